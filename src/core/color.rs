use serde::{Deserialize, Serialize};

/// Opaque RGB color, serialized as a `#rrggbb` hex string.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl Color {
    /// Accent of the destination marker: `#ef4444`
    pub const DESTINATION: Color = Color::rgb(0xef, 0x44, 0x44);
    /// Accent of the current-location marker: `#2563eb`
    pub const CURRENT_LOCATION: Color = Color::rgb(0x25, 0x63, 0xeb);
    /// Toast accent for successful operations: `#22c55e`
    pub const SUCCESS: Color = Color::rgb(0x22, 0xc5, 0x5e);
    /// Toast accent for everything else: `#ef4444`
    pub const ERROR: Color = Color::rgb(0xef, 0x44, 0x44);

    /// Constructs color from its RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Red channel.
    pub fn r(&self) -> u8 {
        self.r
    }

    /// Green channel.
    pub fn g(&self) -> u8 {
        self.g
    }

    /// Blue channel.
    pub fn b(&self) -> u8 {
        self.b
    }

    /// Parses `#rrggbb` or `#rgb` (leading `#` optional).
    pub fn try_from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::rgb(r, g, b))
            }
            3 => {
                let channel = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map(|v| v * 17);
                Some(Self::rgb(
                    channel(0).ok()?,
                    channel(1).ok()?,
                    channel(2).ok()?,
                ))
            }
            _ => None,
        }
    }

    /// Lower-case `#rrggbb` representation.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::try_from_hex(&value).ok_or_else(|| format!("invalid hex color: {value}"))
    }
}

impl From<Color> for String {
    fn from(val: Color) -> Self {
        val.to_hex()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(Color::try_from_hex("#ef4444"), Some(Color::DESTINATION));
        assert_eq!(Color::try_from_hex("2563EB"), Some(Color::CURRENT_LOCATION));
        assert_eq!(Color::try_from_hex("#fff"), Some(Color::rgb(255, 255, 255)));
        assert_eq!(Color::try_from_hex("#12345"), None);
        assert_eq!(Color::try_from_hex("#gg0000"), None);
    }

    #[test]
    fn serializes_as_hex_string() {
        let json = serde_json::to_string(&Color::SUCCESS).unwrap();
        assert_eq!(json, "\"#22c55e\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::SUCCESS);
        assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
    }
}
