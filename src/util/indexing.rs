use crate::util::*;

/// Number of cells in a square plate.
pub fn buffer_size(size: usize) -> usize {
    size * size
}

/// `buffer_size`, or `None` when the cell count overflows `usize`.
pub fn checked_buffer_size(size: usize) -> Option<usize> {
    size.checked_mul(size)
}

/// Row-major linear index of a coordinate.
pub fn coord_to_linear(coord: &Coord, size: usize) -> usize {
    debug_assert!(
        coord[0] < size && coord[1] < size,
        "{:?} is outside a {size}x{size} plate",
        coord
    );
    coord[0] * size + coord[1]
}

pub fn linear_to_coord(linear_index: usize, size: usize) -> Coord {
    debug_assert!(linear_index < buffer_size(size));
    vector![linear_index / size, linear_index % size]
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn buffer_size_test() {
        assert_eq!(buffer_size(3), 9);
        assert_eq!(buffer_size(1024), 1024 * 1024);
        assert_eq!(checked_buffer_size(1024), Some(1024 * 1024));
        assert_eq!(checked_buffer_size(usize::MAX), None);
    }

    #[test]
    fn coord_to_linear_index_test() {
        {
            let coord = vector![5, 7];
            assert_eq!(coord_to_linear(&coord, 20), 5 * 20 + 7);
        }

        {
            let coord = vector![0, 0];
            assert_eq!(coord_to_linear(&coord, 20), 0);
        }

        {
            let coord = vector![19, 19];
            assert_eq!(coord_to_linear(&coord, 20), 399);
        }
    }

    #[test]
    fn linear_to_coord_test() {
        assert_eq!(linear_to_coord(67, 10), vector![6, 7]);
        assert_eq!(linear_to_coord(0, 10), vector![0, 0]);
        for i in 0..buffer_size(7) {
            assert_eq!(coord_to_linear(&linear_to_coord(i, 7), 7), i);
        }
    }

    #[test]
    fn boundary_test() {
        let size = 5;
        assert!(is_boundary(&vector![0, 2], size));
        assert!(is_boundary(&vector![4, 2], size));
        assert!(is_boundary(&vector![2, 0], size));
        assert!(is_boundary(&vector![2, 4], size));
        assert!(!is_boundary(&vector![2, 2], size));
        assert_eq!(interior(size), 1..4);
    }
}
