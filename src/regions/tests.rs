use super::*;
use crate::error::SaliencyError;
use crate::image::RgbImage8;

/// 4x2 map with three vertical stripes: columns 0, 1-2, 3.
fn stripes() -> RegionPartition {
    let labels = [7, 3, 3, 9, 7, 3, 3, 9];
    RegionPartition::from_labels(4, 2, &labels).unwrap()
}

#[test]
fn labels_are_compacted_in_first_seen_order() {
    let p = stripes();
    assert_eq!(p.len(), 3);
    assert_eq!(p.label_at(0, 0), 0);
    assert_eq!(p.label_at(1, 1), 1);
    assert_eq!(p.label_at(3, 1), 2);
    assert_eq!(p.region(1).size(), 4);
    let coords: Vec<_> = p.coords(2).collect();
    assert_eq!(coords, vec![(3, 0), (3, 1)]);
}

#[test]
fn neighbors_are_symmetric_and_sorted() {
    let p = stripes();
    assert_eq!(p.region(0).neighbors, vec![1]);
    assert_eq!(p.region(1).neighbors, vec![0, 2]);
    assert_eq!(p.region(2).neighbors, vec![1]);
    p.validate().unwrap();
}

#[test]
fn block_partition_tiles_and_clips() {
    let p = RegionPartition::from_blocks(5, 4, 2).unwrap();
    // 3 columns of tiles x 2 rows of tiles
    assert_eq!(p.len(), 6);
    assert_eq!(p.region(2).size(), 2);
    // 4-connectivity only, no diagonal neighbours
    assert_eq!(p.region(0).neighbors, vec![1, 3]);
    assert_eq!(p.region(4).neighbors, vec![1, 3, 5]);
}

#[test]
fn border_regions_exclude_interior() {
    // 3x3 tiles of 2px on a 6x6 image; only the centre tile is interior.
    let p = RegionPartition::from_blocks(6, 6, 2).unwrap();
    let border = p.border_regions();
    assert_eq!(border, vec![0, 1, 2, 3, 5, 6, 7, 8]);
}

#[test]
fn label_length_mismatch_is_rejected() {
    let err = RegionPartition::from_labels(3, 3, &[0; 8]).unwrap_err();
    assert!(matches!(err, SaliencyError::BufferLength { got: 8, expected: 9 }));
}

#[test]
fn empty_label_map_is_rejected() {
    let err = RegionPartition::from_labels(0, 0, &[]).unwrap_err();
    assert!(matches!(err, SaliencyError::EmptyPartition));
}

#[test]
fn features_average_region_colours() {
    let mut p = stripes();
    let red = [220u8, 20, 20];
    let grey = [128u8, 128, 128];
    let pixels = vec![red, grey, grey, red, red, grey, grey, red];
    let view = RgbImage8 {
        w: 4,
        h: 2,
        data: &pixels,
    };
    p.compute_features(&view).unwrap();
    let expected_red = normalized_lab(red);
    let expected_grey = normalized_lab(grey);
    assert!(feature_distance(&p.feature(0), &expected_red) < 1e-5);
    assert!(feature_distance(&p.feature(1), &expected_grey) < 1e-5);
    assert!(feature_distance(&p.feature(0), &p.feature(2)) < 1e-6);
}

#[test]
fn features_reject_wrong_image_size() {
    let mut p = stripes();
    let pixels = vec![[0u8; 3]; 6];
    let view = RgbImage8 {
        w: 3,
        h: 2,
        data: &pixels,
    };
    let err = p.compute_features(&view).unwrap_err();
    assert!(matches!(err, SaliencyError::SignalDimensions { .. }));
}

#[test]
fn scatter_paints_region_values() {
    let p = stripes();
    let img = p.scatter(&[0.1, 0.5, 0.9]).unwrap();
    assert_eq!(img.data, vec![0.1, 0.5, 0.5, 0.9, 0.1, 0.5, 0.5, 0.9]);
    assert!(matches!(
        p.scatter(&[0.0; 2]),
        Err(SaliencyError::SignalLength { got: 2, expected: 3 })
    ));
}

#[test]
fn validate_graph_flags_out_of_range_neighbors() {
    struct Broken;
    impl RegionGraph for Broken {
        fn region_count(&self) -> usize {
            2
        }
        fn feature(&self, _i: usize) -> [f32; 3] {
            [0.0; 3]
        }
        fn neighbors(&self, i: usize) -> &[usize] {
            if i == 0 {
                &[1]
            } else {
                &[5]
            }
        }
    }
    let err = validate_graph(&Broken).unwrap_err();
    assert!(matches!(err, SaliencyError::RegionIndex { index: 5, count: 2, .. }));
    assert!(validate_graph(&stripes()).is_ok());
}

#[test]
fn short_colour_buffer_is_rejected() {
    let short = [[0u8; 3]; 3];
    let view = RgbImage8 {
        w: 4,
        h: 4,
        data: &short,
    };
    let err = RegionPartition::from_blocks(4, 4, 2)
        .unwrap()
        .with_features(&view)
        .unwrap_err();
    assert!(matches!(err, SaliencyError::BufferLength { got: 3, expected: 16 }));
}
