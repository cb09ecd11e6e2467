//! Fixed 16-color palette
//!
//! All drawing references colors by index. The palette is resolved once at
//! startup from a string of 16 concatenated hex triplets (no separators).

use serde::{Deserialize, Serialize};

use crate::error::PaletteError;

/// Number of palette entries
pub const PALETTE_SIZE: usize = 16;
/// Hex characters per color
const CHARS_PER_COLOR: usize = 6;

/// DB16 (the TIC-80 default palette)
pub const DEFAULT_PALETTE: &str =
    "140C1C44243430346D4E4A4F854C30346524D04648757161597DCED27D2C8595A16DAA2CD2AA996DC2CADAD45EDEEED6";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    colors: [u32; PALETTE_SIZE],
}

impl Palette {
    /// Parse a 96-character hex string into 16 `0xRRGGBB` colors
    pub fn from_hex(hex: &str) -> Result<Self, PaletteError> {
        let expected = PALETTE_SIZE * CHARS_PER_COLOR;
        if hex.len() != expected {
            return Err(PaletteError::WrongLength {
                actual: hex.len(),
                expected,
            });
        }

        let mut colors = [0u32; PALETTE_SIZE];
        for (index, chunk) in hex.as_bytes().chunks(CHARS_PER_COLOR).enumerate() {
            let invalid = || PaletteError::InvalidHex {
                index,
                chunk: String::from_utf8_lossy(chunk).into_owned(),
            };
            // from_str_radix tolerates a leading sign, so check digits first
            if !chunk.iter().all(u8::is_ascii_hexdigit) {
                return Err(invalid());
            }
            let text = std::str::from_utf8(chunk).map_err(|_| invalid())?;
            colors[index] = u32::from_str_radix(text, 16).map_err(|_| invalid())?;
        }

        Ok(Self { colors })
    }

    /// Color at `index` as `0xRRGGBB`, or `None` outside the palette
    pub fn rgb(&self, index: u8) -> Option<u32> {
        self.colors.get(index as usize).copied()
    }

    pub fn colors(&self) -> &[u32; PALETTE_SIZE] {
        &self.colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        // DEFAULT_PALETTE is well-formed; fall back to black if that ever changes
        Self::from_hex(DEFAULT_PALETTE).unwrap_or(Self {
            colors: [0; PALETTE_SIZE],
        })
    }
}
