//! Theme color validation and WCAG contrast math.
//!
//! Site themes are configured with hex colors. Colors are validated before
//! they are stored, and the contrast helpers pick readable text colors and
//! derive the subtle background/border variants from a single base color.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("{0} is not a valid hex color code. Use format #rrggbb or #rgb")]
    InvalidHex(String),
}

static HEX_COLOR_REGEX: OnceLock<Regex> = OnceLock::new();

fn hex_color_regex() -> &'static Regex {
    HEX_COLOR_REGEX.get_or_init(|| {
        Regex::new(r"^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$").expect("Invalid hex color regex")
    })
}

/// Validate a `#rgb` or `#rrggbb` color. An empty value means "unset" and is valid.
pub fn validate_hex_color(value: &str) -> Result<(), ColorError> {
    if value.is_empty() || hex_color_regex().is_match(value) {
        Ok(())
    } else {
        Err(ColorError::InvalidHex(value.to_string()))
    }
}

/// Parse a 3- or 6-digit hex color, with or without `#`.
pub fn hex_to_rgb(hex: &str) -> Result<(u8, u8, u8), ColorError> {
    let digits = hex.trim_start_matches('#');
    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return Err(ColorError::InvalidHex(hex.to_string())),
    };

    let channel = |range: std::ops::Range<usize>| {
        expanded
            .get(range)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .ok_or_else(|| ColorError::InvalidHex(hex.to_string()))
    };

    Ok((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Format RGB channels as `#rrggbb`, clamping each to 0..=255.
pub fn rgb_to_hex(r: i32, g: i32, b: i32) -> String {
    let clamp = |c: i32| c.clamp(0, 255);
    format!("#{:02x}{:02x}{:02x}", clamp(r), clamp(g), clamp(b))
}

/// WCAG 2.1 relative luminance.
pub fn relative_luminance(hex: &str) -> Result<f64, ColorError> {
    let (r, g, b) = hex_to_rgb(hex)?;
    let linear = |c: u8| {
        let c = f64::from(c) / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    Ok(0.2126 * linear(r) + 0.7152 * linear(g) + 0.0722 * linear(b))
}

/// WCAG 2.1 contrast ratio, between 1.0 and 21.0.
pub fn contrast_ratio(color1: &str, color2: &str) -> Result<f64, ColorError> {
    let l1 = relative_luminance(color1)?;
    let l2 = relative_luminance(color2)?;
    let (lighter, darker) = if l1 >= l2 { (l1, l2) } else { (l2, l1) };
    Ok((lighter + 0.05) / (darker + 0.05))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WcagRating {
    Aaa,
    Aa,
    Fail,
}

impl WcagRating {
    pub fn as_str(&self) -> &'static str {
        match self {
            WcagRating::Aaa => "AAA",
            WcagRating::Aa => "AA",
            WcagRating::Fail => "Fail",
        }
    }
}

pub fn wcag_rating(ratio: f64) -> WcagRating {
    if ratio >= 7.0 {
        WcagRating::Aaa
    } else if ratio >= 4.5 {
        WcagRating::Aa
    } else {
        WcagRating::Fail
    }
}

/// Whether dark text is needed on this background.
pub fn is_light_background(hex: &str) -> Result<bool, ColorError> {
    Ok(relative_luminance(hex)? > 0.179)
}

/// Mix two colors; `weight` is the share of `color1` (0.0 to 1.0).
pub fn mix_colors(color1: &str, color2: &str, weight: f64) -> Result<String, ColorError> {
    let (r1, g1, b1) = hex_to_rgb(color1)?;
    let (r2, g2, b2) = hex_to_rgb(color2)?;
    let mix = |a: u8, b: u8| (f64::from(a) * weight + f64::from(b) * (1.0 - weight)).round() as i32;
    Ok(rgb_to_hex(mix(r1, r2), mix(g1, g2), mix(b1, b2)))
}

/// Subtle variants of a base color for backgrounds, borders and emphasis text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeVariants {
    pub bg_subtle: String,
    pub border_subtle: String,
    pub text_emphasis: String,
}

pub fn derive_theme_variants(base: &str) -> Result<ThemeVariants, ColorError> {
    Ok(ThemeVariants {
        bg_subtle: mix_colors("#ffffff", base, 0.80)?,
        border_subtle: mix_colors("#ffffff", base, 0.60)?,
        text_emphasis: mix_colors("#000000", base, 0.40)?,
    })
}
