/// Running colour sum for one region while its pixels are visited.
#[derive(Clone, Debug, Default)]
pub(crate) struct ColorAccumulator {
    pub count: usize,
    pub sum: [f64; 3],
}

impl ColorAccumulator {
    pub(crate) fn push(&mut self, c: [f32; 3]) {
        self.count += 1;
        for (s, v) in self.sum.iter_mut().zip(c) {
            *s += v as f64;
        }
    }

    pub(crate) fn mean(&self) -> [f32; 3] {
        if self.count == 0 {
            return [0.0; 3];
        }
        let n = self.count as f64;
        [
            (self.sum[0] / n) as f32,
            (self.sum[1] / n) as f32,
            (self.sum[2] / n) as f32,
        ]
    }
}
