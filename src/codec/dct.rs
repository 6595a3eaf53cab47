//! Discrete Cosine Transform (DCT-II) on 8x8 blocks.
//!
//! Uses the separable orthonormal basis `C`, so the forward transform is
//! `C * B * C^T` and the inverse is `C^T * M * C`.

use std::f64::consts::PI;
use std::sync::OnceLock;

use super::{Block, BLOCK_LEN, BLOCK_SIZE};

/// The orthonormal DCT basis and its transpose, row-major.
struct Basis {
    forward: Block,
    transposed: Block,
}

fn basis() -> &'static Basis {
    static BASIS: OnceLock<Basis> = OnceLock::new();
    BASIS.get_or_init(|| {
        let mut forward = [0.0f64; BLOCK_LEN];
        for i in 0..BLOCK_SIZE {
            for j in 0..BLOCK_SIZE {
                forward[i * BLOCK_SIZE + j] = if i == 0 {
                    1.0 / (BLOCK_SIZE as f64).sqrt()
                } else {
                    0.5 * (((2 * j + 1) * i) as f64 * PI / 16.0).cos()
                };
            }
        }
        Basis {
            forward,
            transposed: transpose(&forward),
        }
    })
}

/// The basis matrix `C`, where `C[i][j] = 1/sqrt(8)` for `i = 0` and
/// `cos((2j + 1) i pi / 16) / 2` otherwise.
pub fn basis_matrix() -> Block {
    basis().forward
}

/// Forward 2D DCT.
pub fn dct_2d(block: &Block) -> Block {
    let b = basis();
    multiply(&multiply(&b.forward, block), &b.transposed)
}

/// Inverse 2D DCT.
pub fn idct_2d(coefficients: &Block) -> Block {
    let b = basis();
    multiply(&multiply(&b.transposed, coefficients), &b.forward)
}

fn multiply(a: &Block, b: &Block) -> Block {
    let mut out = [0.0f64; BLOCK_LEN];
    for row in 0..BLOCK_SIZE {
        for col in 0..BLOCK_SIZE {
            let mut sum = 0.0;
            for k in 0..BLOCK_SIZE {
                sum += a[row * BLOCK_SIZE + k] * b[k * BLOCK_SIZE + col];
            }
            out[row * BLOCK_SIZE + col] = sum;
        }
    }
    out
}

fn transpose(m: &Block) -> Block {
    let mut out = [0.0f64; BLOCK_LEN];
    for row in 0..BLOCK_SIZE {
        for col in 0..BLOCK_SIZE {
            out[col * BLOCK_SIZE + row] = m[row * BLOCK_SIZE + col];
        }
    }
    out
}
