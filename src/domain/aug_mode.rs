// ============================================================
// Layer 3 — Augmentation Mode
// ============================================================
// Five named strategies. a–d expand every training image into a
// fixed set of copies; e draws one seeded random transform per
// image instead.
//
//   a  identity, horizontal flip                      (×2)
//   b  identity, horizontal flip, vertical flip       (×3)
//   c  identity, rot90, rot180, rot270                (×4)
//   d  full dihedral group: rotations × h-flip        (×8)
//   e  one random dihedral transform + random crop    (×1)

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A single geometric transform of a square tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    Identity,
    FlipH,
    FlipV,
    Rot90,
    Rot180,
    Rot270,
    /// Horizontal flip followed by a rotation
    FlipHRot90,
    FlipHRot180,
    FlipHRot270,
}

impl Transform {
    /// The eight symmetries of a square.
    pub const DIHEDRAL: [Transform; 8] = [
        Transform::Identity,
        Transform::Rot90,
        Transform::Rot180,
        Transform::Rot270,
        Transform::FlipH,
        Transform::FlipHRot90,
        Transform::FlipHRot180,
        Transform::FlipHRot270,
    ];
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AugMode {
    A,
    B,
    C,
    D,
    E,
}

impl AugMode {
    /// Deterministic transforms applied to every image, or `None`
    /// when the mode samples a random transform per image.
    pub fn fixed_transforms(self) -> Option<&'static [Transform]> {
        use Transform::*;
        match self {
            AugMode::A => Some(&[Identity, FlipH]),
            AugMode::B => Some(&[Identity, FlipH, FlipV]),
            AugMode::C => Some(&[Identity, Rot90, Rot180, Rot270]),
            AugMode::D => Some(&Transform::DIHEDRAL),
            AugMode::E => None,
        }
    }

    /// How many samples one source image yields.
    pub fn expansion(self) -> usize {
        self.fixed_transforms().map_or(1, <[Transform]>::len)
    }
}

impl std::fmt::Display for AugMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AugMode::A => "a",
            AugMode::B => "b",
            AugMode::C => "c",
            AugMode::D => "d",
            AugMode::E => "e",
        };
        f.write_str(name)
    }
}
