mod tests {
    use myrtio_led_driver::{MatrixCorner, MatrixDescriptor, MatrixOrientation, MatrixTopology};

    const CORNERS: [MatrixCorner; 4] = [
        MatrixCorner::LeftBottom,
        MatrixCorner::LeftTop,
        MatrixCorner::RightTop,
        MatrixCorner::RightBottom,
    ];
    const ORIENTATIONS: [MatrixOrientation; 2] =
        [MatrixOrientation::Horizontal, MatrixOrientation::Vertical];
    const TOPOLOGIES: [MatrixTopology; 2] = [MatrixTopology::Serpentine, MatrixTopology::RowMajor];

    fn all_layouts(width: u16, height: u16) -> impl Iterator<Item = MatrixDescriptor> {
        TOPOLOGIES.into_iter().flat_map(move |topology| {
            CORNERS.into_iter().flat_map(move |corner| {
                ORIENTATIONS.into_iter().map(move |orientation| {
                    MatrixDescriptor::new(width, height)
                        .with_topology(topology)
                        .with_corner(corner)
                        .with_orientation(orientation)
                })
            })
        })
    }

    #[test]
    fn test_every_layout_is_a_bijection() {
        for matrix in all_layouts(5, 4) {
            let mut seen = [false; 20];
            for x in 0..5 {
                for y in 0..4 {
                    let index = matrix.coordinate_to_index(x, y).unwrap();
                    assert!(index < 20, "{matrix:?}");
                    assert!(!seen[index], "{matrix:?} maps two cells to {index}");
                    seen[index] = true;
                }
            }
            assert!(seen.iter().all(|&hit| hit), "{matrix:?}");
        }
    }

    #[test]
    fn test_inverse_matches_forward_mapping() {
        for matrix in all_layouts(3, 7) {
            for index in 0..matrix.len() {
                let (x, y) = matrix.index_to_coordinate(index).unwrap();
                assert_eq!(
                    matrix.coordinate_to_index(i32::from(x), i32::from(y)),
                    Some(index),
                    "{matrix:?}"
                );
            }
            assert_eq!(matrix.index_to_coordinate(matrix.len()), None);
        }
    }

    #[test]
    fn test_serpentine_rows() {
        let matrix = MatrixDescriptor::new(10, 3);

        let row = |y: i32| -> Vec<usize> {
            (0..10)
                .map(|x| matrix.coordinate_to_index(x, y).unwrap())
                .collect()
        };
        assert_eq!(row(0), (0..10).collect::<Vec<_>>());
        assert_eq!(row(1), (10..20).rev().collect::<Vec<_>>());
        assert_eq!(row(2), (20..30).collect::<Vec<_>>());
    }

    #[test]
    fn test_row_major_rows() {
        let matrix = MatrixDescriptor::new(10, 3).with_topology(MatrixTopology::RowMajor);

        assert_eq!(matrix.coordinate_to_index(0, 1), Some(10));
        assert_eq!(matrix.coordinate_to_index(9, 1), Some(19));
    }

    #[test]
    fn test_first_led_sits_in_the_chosen_corner() {
        let (width, height) = (6, 5);
        let expected = [
            (MatrixCorner::LeftBottom, (0, 0)),
            (MatrixCorner::LeftTop, (0, height - 1)),
            (MatrixCorner::RightTop, (width - 1, height - 1)),
            (MatrixCorner::RightBottom, (width - 1, 0)),
        ];

        for (corner, (x, y)) in expected {
            for orientation in ORIENTATIONS {
                let matrix = MatrixDescriptor::new(width, height)
                    .with_corner(corner)
                    .with_orientation(orientation);
                assert_eq!(matrix.index_to_coordinate(0), Some((x, y)), "{matrix:?}");
            }
        }
    }

    #[test]
    fn test_vertical_lines_run_along_columns() {
        let matrix = MatrixDescriptor::new(4, 3).with_orientation(MatrixOrientation::Vertical);

        assert_eq!(matrix.coordinate_to_index(0, 0), Some(0));
        assert_eq!(matrix.coordinate_to_index(0, 2), Some(2));
        assert_eq!(matrix.coordinate_to_index(1, 2), Some(3));
        assert_eq!(matrix.coordinate_to_index(1, 0), Some(5));
    }

    #[test]
    fn test_out_of_range_coordinates() {
        let matrix = MatrixDescriptor::new(4, 3);

        assert_eq!(matrix.coordinate_to_index(-1, 0), None);
        assert_eq!(matrix.coordinate_to_index(0, -1), None);
        assert_eq!(matrix.coordinate_to_index(4, 0), None);
        assert_eq!(matrix.coordinate_to_index(0, 3), None);
        assert!(!matrix.contains(i32::MAX, 0));
    }

    #[test]
    fn test_out_of_range_coordinates_in_every_layout() {
        for matrix in all_layouts(4, 3) {
            for (x, y) in [(4, 0), (0, 3), (4, 3), (-1, -1), (i32::MAX, i32::MAX)] {
                assert_eq!(matrix.coordinate_to_index(x, y), None, "{matrix:?} ({x}, {y})");
            }
        }
    }
}
