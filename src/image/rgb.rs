/// Borrowed packed 8-bit RGB view, one `[r, g, b]` triple per pixel.
#[derive(Clone, Copy, Debug)]
pub struct RgbImage8<'a> {
    pub w: usize,
    pub h: usize,
    pub data: &'a [[u8; 3]],
}

impl<'a> RgbImage8<'a> {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> [u8; 3] {
        self.data[y * self.w + x]
    }
}

impl<'a> crate::image::traits::ImageView for RgbImage8<'a> {
    type Pixel = [u8; 3];

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[[u8; 3]] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
}
