//! Shading mode selection

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which lighting model the renderer binds for the next frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ShadingMode {
    /// Per-face normals, faceted look
    #[default]
    Flat,
    /// Interpolated per-vertex normals, smooth look
    Phong,
}

impl ShadingMode {
    /// All modes in toggle order
    pub const ALL: [ShadingMode; 2] = [ShadingMode::Flat, ShadingMode::Phong];

    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            ShadingMode::Flat => ShadingMode::Phong,
            ShadingMode::Phong => ShadingMode::Flat,
        }
    }

    /// Flip to the other mode in place
    pub fn toggle(&mut self) {
        *self = self.toggled();
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            ShadingMode::Flat => "Flat",
            ShadingMode::Phong => "Phong",
        }
    }
}

impl fmt::Display for ShadingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
