// ============================================================
// Layer 3 — Band Mode
// ============================================================
// Selects which colour channels are read from every image.
//
//   Y      → 1 channel  (luma only)
//   YCbCr  → 3 channels (luma + two chroma planes)
//   RGB    → 3 channels (full colour)

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Colour-channel representation used for input and target tiles.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BandMode {
    #[value(name = "Y")]
    Y,
    #[value(name = "YCbCr")]
    YCbCr,
    #[value(name = "RGB")]
    #[serde(rename = "RGB")]
    Rgb,
}

impl BandMode {
    /// Number of channels every tensor produced under this mode carries.
    pub fn channels(self) -> usize {
        match self {
            BandMode::Y => 1,
            BandMode::YCbCr | BandMode::Rgb => 3,
        }
    }

    /// Convert one 8-bit RGB pixel into this mode's channel values in [0, 1].
    ///
    /// YCbCr uses the full-range BT.601 transform.
    pub fn project(self, [r, g, b]: [u8; 3]) -> [f32; 3] {
        let (r, g, b) = (r as f32, g as f32, b as f32);
        let y = 0.299 * r + 0.587 * g + 0.114 * b;
        match self {
            BandMode::Y => [y / 255.0, 0.0, 0.0],
            BandMode::YCbCr => {
                let cb = 128.0 - 0.168_736 * r - 0.331_264 * g + 0.5 * b;
                let cr = 128.0 + 0.5 * r - 0.418_688 * g - 0.081_312 * b;
                [y / 255.0, cb / 255.0, cr / 255.0]
            }
            BandMode::Rgb => [r / 255.0, g / 255.0, b / 255.0],
        }
    }
}

impl std::fmt::Display for BandMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BandMode::Y => "Y",
            BandMode::YCbCr => "YCbCr",
            BandMode::Rgb => "RGB",
        };
        f.write_str(name)
    }
}
