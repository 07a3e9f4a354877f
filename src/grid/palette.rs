use std::{fmt, str::FromStr};

use crate::foundation::{
    core::Rgba8Premul,
    error::{DotwalkError, DotwalkResult},
};

/// Number of colors in every built-in palette.
pub const PALETTE_LEN: usize = 5;

/// The fixed set of selectable palettes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PaletteName {
    /// "Schema 1": dark purples, rose and gold.
    #[default]
    Schema1,
    /// "Schema 2": blues and lilacs.
    Schema2,
    /// "Schema 3": golds through dark red.
    Schema3,
    /// "Schema 4": teals, lime, orange and cream.
    Schema4,
}

impl PaletteName {
    /// All palettes in selector order.
    pub const ALL: [PaletteName; 4] = [
        PaletteName::Schema1,
        PaletteName::Schema2,
        PaletteName::Schema3,
        PaletteName::Schema4,
    ];

    /// Display label as shown in the palette selector.
    pub fn label(self) -> &'static str {
        match self {
            Self::Schema1 => "Schema 1",
            Self::Schema2 => "Schema 2",
            Self::Schema3 => "Schema 3",
            Self::Schema4 => "Schema 4",
        }
    }

    fn rgb_table(self) -> [u32; PALETTE_LEN] {
        match self {
            Self::Schema1 => [0x22162B, 0x451F55, 0x724E91, 0xE54F6D, 0xF8C630],
            Self::Schema2 => [0x574AE2, 0x222A68, 0x654597, 0xAB81CD, 0xE2ADF2],
            Self::Schema3 => [0xFFD700, 0xFF8C00, 0xFF4500, 0xDC143C, 0x8B0000],
            Self::Schema4 => [0x002626, 0x0E4749, 0x95C623, 0xE55812, 0xEFE7DA],
        }
    }
}

impl fmt::Display for PaletteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaletteName {
    type Err = DotwalkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept "Schema 3", "schema-3", "schema3" and "3".
        let norm: String = s
            .trim()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        let digit = norm.strip_prefix("schema").unwrap_or(&norm);
        match digit {
            "1" => Ok(Self::Schema1),
            "2" => Ok(Self::Schema2),
            "3" => Ok(Self::Schema3),
            "4" => Ok(Self::Schema4),
            _ => Err(DotwalkError::palette(format!(
                "unknown palette \"{s}\" (expected one of: Schema 1, Schema 2, Schema 3, Schema 4)"
            ))),
        }
    }
}

impl serde::Serialize for PaletteName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> serde::Deserialize<'de> for PaletteName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A named, ordered list of dot colors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    name: PaletteName,
    colors: [Rgba8Premul; PALETTE_LEN],
}

impl Palette {
    /// Built-in colors for `name`.
    pub fn get(name: PaletteName) -> Self {
        let colors = name
            .rgb_table()
            .map(|rgb| Rgba8Premul::opaque((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8));
        Self { name, colors }
    }

    /// Which built-in palette this is.
    pub fn name(&self) -> PaletteName {
        self.name
    }

    /// Colors in palette order.
    pub fn colors(&self) -> &[Rgba8Premul] {
        &self.colors
    }

    /// Colors formatted as `#RRGGBB`, in palette order.
    pub fn hex_colors(&self) -> Vec<String> {
        self.colors
            .iter()
            .map(|c| format!("#{:02X}{:02X}{:02X}", c.r, c.g, c.b))
            .collect()
    }

    /// True if `color` is one of the palette's colors.
    pub fn contains(&self, color: Rgba8Premul) -> bool {
        self.colors.contains(&color)
    }

    /// Uniform pick with replacement.
    pub fn pick(&self, rng: &mut impl rand::Rng) -> Rgba8Premul {
        self.colors[rng.random_range(0..self.colors.len())]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::get(PaletteName::default())
    }
}

/// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional, case-insensitive) into premultiplied RGBA8.
pub fn parse_hex_rgb(s: &str) -> DotwalkResult<Rgba8Premul> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> DotwalkResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| DotwalkError::palette(format!("invalid hex byte \"{pair}\"")))
    }

    if !s.is_ascii() {
        return Err(DotwalkError::palette("hex color must be ASCII"));
    }

    let (r, g, b, a) = match s.len() {
        6 => (hex_byte(&s[0..2])?, hex_byte(&s[2..4])?, hex_byte(&s[4..6])?, 255),
        8 => (
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        ),
        _ => {
            return Err(DotwalkError::palette(
                "hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)",
            ));
        }
    };

    Ok(Rgba8Premul::from_straight_rgba(r, g, b, a))
}

#[cfg(test)]
#[path = "../../tests/unit/grid/palette.rs"]
mod tests;
