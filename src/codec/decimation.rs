//! Lossy 2x2 decimation applied inside each block before the transform.
//!
//! Decoding never undoes it: the duplicated samples simply go through the
//! DCT like any others.

use std::str::FromStr;

use super::{Block, BLOCK_SIZE};
use crate::error::{Error, Result};

/// How each non-overlapping 2x2 group `[[a, b], [c, d]]` is reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Decimation {
    /// Keep the left column: `[[a, a], [c, c]]`.
    Leave2Left,
    /// Keep the top row: `[[a, b], [a, b]]`.
    Leave2Top,
    /// Keep only the top-left sample: `[[a, a], [a, a]]`.
    Leave1TopLeft,
    /// Leave the group untouched.
    #[default]
    None,
}

impl Decimation {
    /// Reduce one 2x2 group.
    #[inline]
    pub fn apply_group(self, [[a, b], [c, d]]: [[f64; 2]; 2]) -> [[f64; 2]; 2] {
        match self {
            Decimation::Leave2Left => [[a, a], [c, c]],
            Decimation::Leave2Top => [[a, b], [a, b]],
            Decimation::Leave1TopLeft => [[a, a], [a, a]],
            Decimation::None => [[a, b], [c, d]],
        }
    }

    /// Reduce every 2x2 group of a row-major block.
    pub fn apply(self, block: &Block) -> Block {
        if self == Decimation::None {
            return *block;
        }
        let mut out = *block;
        for row in (0..BLOCK_SIZE).step_by(2) {
            for col in (0..BLOCK_SIZE).step_by(2) {
                let top = row * BLOCK_SIZE + col;
                let bottom = top + BLOCK_SIZE;
                let [[a, b], [c, d]] = self.apply_group([
                    [block[top], block[top + 1]],
                    [block[bottom], block[bottom + 1]],
                ]);
                out[top] = a;
                out[top + 1] = b;
                out[bottom] = c;
                out[bottom + 1] = d;
            }
        }
        out
    }
}

impl FromStr for Decimation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "leave2left" => Ok(Decimation::Leave2Left),
            "leave2top" => Ok(Decimation::Leave2Top),
            "leave1topleft" => Ok(Decimation::Leave1TopLeft),
            "none" => Ok(Decimation::None),
            _ => Err(Error::UnsupportedOption {
                kind: "decimation",
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered() -> Block {
        let mut block = [0.0; 64];
        for (i, v) in block.iter_mut().enumerate() {
            *v = i as f64;
        }
        block
    }

    #[test]
    fn test_group_rules() {
        let g = [[1.0, 2.0], [3.0, 4.0]];
        assert_eq!(Decimation::Leave2Left.apply_group(g), [[1.0, 1.0], [3.0, 3.0]]);
        assert_eq!(Decimation::Leave2Top.apply_group(g), [[1.0, 2.0], [1.0, 2.0]]);
        assert_eq!(Decimation::Leave1TopLeft.apply_group(g), [[1.0, 1.0], [1.0, 1.0]]);
        assert_eq!(Decimation::None.apply_group(g), g);
    }

    #[test]
    fn test_block_groups_are_independent() {
        let out = Decimation::Leave1TopLeft.apply(&numbered());
        // group at rows 2..4, cols 4..6 collapses to sample (2, 4)
        for (r, c) in [(2, 4), (2, 5), (3, 4), (3, 5)] {
            assert_eq!(out[r * 8 + c], 20.0);
        }
        assert_eq!(out[63], 54.0);
    }

    #[test]
    fn test_leave2top_duplicates_rows() {
        let out = Decimation::Leave2Top.apply(&numbered());
        for col in 0..8 {
            assert_eq!(out[8 + col], col as f64);
            assert_eq!(out[7 * 8 + col], (6 * 8 + col) as f64);
        }
    }

    #[test]
    fn test_none_is_identity() {
        let block = numbered();
        assert_eq!(Decimation::None.apply(&block), block);
    }

    #[test]
    fn test_parse() {
        assert_eq!("Leave2Left".parse::<Decimation>().unwrap(), Decimation::Leave2Left);
        assert_eq!(
            "leave-1-top-left".parse::<Decimation>().unwrap(),
            Decimation::Leave1TopLeft
        );
        assert!(matches!(
            "leave3".parse::<Decimation>(),
            Err(Error::UnsupportedOption { kind: "decimation", .. })
        ));
    }
}
