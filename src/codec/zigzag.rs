//! Zig-zag serialization of 8x8 blocks.

use super::BLOCK_LEN;

/// Zigzag scan order for 8x8 block: `ZIGZAG[k]` is the row-major index of
/// the k-th serialized value. Each anti-diagonal flips direction, starting
/// from the DC corner.
pub const ZIGZAG: [usize; BLOCK_LEN] = [
    0, 1, 8, 16, 9, 2, 3, 10, 17, 24, 32, 25, 18, 11, 4, 5, 12, 19, 26, 33, 40, 48, 41, 34, 27, 20,
    13, 6, 7, 14, 21, 28, 35, 42, 49, 56, 57, 50, 43, 36, 29, 22, 15, 23, 30, 37, 44, 51, 58, 59,
    52, 45, 38, 31, 39, 46, 53, 60, 61, 54, 47, 55, 62, 63,
];

/// Serialize a row-major block in zig-zag order.
pub fn zigzag<T: Copy + Default>(block: &[T; BLOCK_LEN]) -> [T; BLOCK_LEN] {
    let mut result = [T::default(); BLOCK_LEN];
    for (k, &pos) in ZIGZAG.iter().enumerate() {
        result[k] = block[pos];
    }
    result
}

/// Invert [`zigzag`].
pub fn unzigzag<T: Copy + Default>(sequence: &[T; BLOCK_LEN]) -> [T; BLOCK_LEN] {
    let mut result = [T::default(); BLOCK_LEN];
    for (k, &pos) in ZIGZAG.iter().enumerate() {
        result[pos] = sequence[k];
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zigzag_order() {
        assert_eq!(&ZIGZAG[..6], &[0, 1, 8, 16, 9, 2]);
        assert_eq!(ZIGZAG[63], 63);
    }

    #[test]
    fn test_zigzag_complete() {
        let mut seen = [false; 64];
        for &pos in &ZIGZAG {
            assert!(!seen[pos], "Duplicate position {pos} in zigzag");
            seen[pos] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_zigzag_diagonals_alternate() {
        // Consecutive entries stay on one anti-diagonal or step to the next
        let diag = |pos: usize| pos / 8 + pos % 8;
        for pair in ZIGZAG.windows(2) {
            let (a, b) = (diag(pair[0]), diag(pair[1]));
            assert!(b == a || b == a + 1);
        }
    }

    #[test]
    fn test_zigzag_reorder() {
        let mut block = [0i32; 64];
        block[0] = 100;
        block[1] = 50;
        block[8] = 30;
        let z = zigzag(&block);
        assert_eq!(&z[..3], &[100, 50, 30]);
    }

    #[test]
    fn test_unzigzag_inverts() {
        let mut block = [0i32; 64];
        for (i, v) in block.iter_mut().enumerate() {
            *v = (i as i32 * 31) % 97 - 40;
        }
        assert_eq!(unzigzag(&zigzag(&block)), block);
    }
}
