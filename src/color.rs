use palette::Srgb;
use plotters::style::RGBColor;

use crate::error::{AnalysisError, Result};

// ---------------------------------------------------------------------------
// Bar colours
// ---------------------------------------------------------------------------

/// Fill of the speculative bar.
pub const SPEC_HEX: &str = "#2ca02c";
/// Fill of the sequential bar.
pub const SEQ_HEX: &str = "#1f77b4";

/// Parse a `#rrggbb` (or `#rgb`) hex string into a plotters colour.
pub fn from_hex(hex: &str) -> Result<RGBColor> {
    let rgb: Srgb<u8> = hex.parse().map_err(|e| AnalysisError::Color {
        hex: hex.to_string(),
        reason: format!("{e}"),
    })?;
    Ok(RGBColor(rgb.red, rgb.green, rgb.blue))
}
