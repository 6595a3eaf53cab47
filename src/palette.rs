//! Palette generation and mapping on top of the vector quantizers.

use std::str::FromStr;

use crate::error::{Error, Result};
use crate::image::PixelBuffer;
use crate::quantizer::{generalized_lloyd, median_cut, Codebook, LloydOptions};

/// Which quantizer builds the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteAlgorithm {
    /// LBG splitting; yields the smallest power of two `>= size` colors.
    GeneralizedLloyd {
        /// Requested palette size.
        size: usize,
    },
    /// Median cut; yields `2^depth` colors.
    MedianCut {
        /// Recursion depth.
        depth: u32,
    },
}

impl Default for PaletteAlgorithm {
    fn default() -> Self {
        PaletteAlgorithm::MedianCut { depth: 4 }
    }
}

impl FromStr for PaletteAlgorithm {
    type Err = Error;

    /// Parses `lloyd:<size>` / `generalized-lloyd:<size>` or
    /// `median-cut:<depth>`.
    fn from_str(s: &str) -> Result<Self> {
        let (tag, param) = s.split_once(':').unwrap_or((s, ""));
        let bad_param =
            || Error::InvalidParameter(format!("{param:?} in palette algorithm {s:?}"));
        match tag.to_ascii_lowercase().replace('_', "-").as_str() {
            "lloyd" | "generalized-lloyd" | "generalizedlloyd" | "lbg" => {
                let size = param.trim().parse().map_err(|_| bad_param())?;
                Ok(PaletteAlgorithm::GeneralizedLloyd { size })
            }
            "median-cut" | "mediancut" => {
                let depth = param.trim().parse().map_err(|_| bad_param())?;
                Ok(PaletteAlgorithm::MedianCut { depth })
            }
            _ => Err(Error::UnsupportedOption {
                kind: "palette algorithm",
                value: s.to_string(),
            }),
        }
    }
}

/// Palette generation settings.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PaletteOptions {
    /// Quantizer and its size parameter.
    pub algorithm: PaletteAlgorithm,
    /// Refinement settings, used by [`PaletteAlgorithm::GeneralizedLloyd`].
    pub lloyd: LloydOptions,
}

impl PaletteOptions {
    /// Generalized Lloyd with `size` requested colors.
    pub fn lloyd(size: usize) -> Self {
        Self {
            algorithm: PaletteAlgorithm::GeneralizedLloyd { size },
            ..Self::default()
        }
    }

    /// Median cut with `2^depth` colors.
    pub fn median_cut(depth: u32) -> Self {
        Self {
            algorithm: PaletteAlgorithm::MedianCut { depth },
            ..Self::default()
        }
    }

    /// Replace the Lloyd refinement settings.
    pub fn with_lloyd_options(mut self, lloyd: LloydOptions) -> Self {
        self.lloyd = lloyd;
        self
    }
}

/// Every pixel as an RGBA sample.
pub fn samples(image: &PixelBuffer) -> Vec<[f64; 4]> {
    image.pixels().map(|p| p.map(f64::from)).collect()
}

/// Build a weighted RGBA codebook for `image`.
pub fn generate_palette(image: &PixelBuffer, options: &PaletteOptions) -> Result<Codebook<4>> {
    let samples = samples(image);
    match options.algorithm {
        PaletteAlgorithm::GeneralizedLloyd { size } => {
            generalized_lloyd(&samples, size, &options.lloyd)
        }
        PaletteAlgorithm::MedianCut { depth } => median_cut(&samples, depth),
    }
}

/// Replace every pixel by its nearest palette color over R, G, B and A.
///
/// The codebook is rounded to bytes first. The first color wins ties.
pub fn map_to_palette(image: &PixelBuffer, codebook: &Codebook<4>) -> PixelBuffer {
    let palette = codebook.palette();
    if palette.is_empty() {
        return image.clone();
    }
    image.map_pixels(|px| palette[nearest_palette_index(px, &palette)])
}

/// [`generate_palette`] followed by [`map_to_palette`].
pub fn reduce_colors(image: &PixelBuffer, options: &PaletteOptions) -> Result<PixelBuffer> {
    let codebook = generate_palette(image, options)?;
    Ok(map_to_palette(image, &codebook))
}

/// Index of the palette color with the smallest squared distance.
pub fn nearest_palette_index(color: [u8; 4], palette: &[[u8; 4]]) -> usize {
    let mut best_idx = 0;
    let mut best_dist = u32::MAX;
    for (i, p) in palette.iter().enumerate() {
        let dr = color[0] as i32 - p[0] as i32;
        let dg = color[1] as i32 - p[1] as i32;
        let db = color[2] as i32 - p[2] as i32;
        let da = color[3] as i32 - p[3] as i32;
        let dist = (dr * dr + dg * dg + db * db + da * da) as u32;
        if dist < best_dist {
            best_dist = dist;
            best_idx = i;
        }
    }
    best_idx
}
