//! Tiling planes into 8x8 blocks and back.

use super::{Block, BLOCK_LEN, BLOCK_SIZE};
use crate::error::{Error, Result};
use crate::image::Plane;

/// Blocks needed to cover `len` samples along one axis.
#[inline]
pub fn blocks_for(len: u32) -> usize {
    (len as usize).div_ceil(BLOCK_SIZE)
}

/// Number of blocks tiling a `width x height` plane.
#[inline]
pub fn block_count(width: u32, height: u32) -> usize {
    blocks_for(width) * blocks_for(height)
}

/// Split a plane into row-major blocks.
///
/// Blocks overhanging the right or bottom edge repeat the last valid
/// column or row.
pub fn split_blocks(plane: &Plane) -> Vec<Block> {
    let across = blocks_for(plane.width());
    let down = blocks_for(plane.height());
    let mut blocks = Vec::with_capacity(across * down);
    for block_y in 0..down {
        for block_x in 0..across {
            blocks.push(extract_block(plane, block_x * BLOCK_SIZE, block_y * BLOCK_SIZE));
        }
    }
    blocks
}

fn extract_block(plane: &Plane, x0: usize, y0: usize) -> Block {
    let mut block = [0.0; BLOCK_LEN];
    for dy in 0..BLOCK_SIZE {
        for dx in 0..BLOCK_SIZE {
            block[dy * BLOCK_SIZE + dx] = plane.get_clamped((x0 + dx) as u32, (y0 + dy) as u32);
        }
    }
    block
}

/// Reassemble row-major blocks into a `width x height` plane, dropping
/// padding.
pub fn assemble_plane(blocks: &[Block], width: u32, height: u32) -> Result<Plane> {
    let expected = block_count(width, height);
    if blocks.len() != expected {
        return Err(Error::CorruptStream(format!(
            "expected {expected} blocks for {width}x{height}, got {}",
            blocks.len()
        )));
    }
    let across = blocks_for(width);
    let mut samples = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height as usize {
        let row = &blocks[(y / BLOCK_SIZE) * across..][..across];
        let offset = (y % BLOCK_SIZE) * BLOCK_SIZE;
        for x in 0..width as usize {
            samples.push(row[x / BLOCK_SIZE][offset + x % BLOCK_SIZE]);
        }
    }
    Plane::new(width, height, samples)
}
