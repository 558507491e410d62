use std::fmt::Display;

/// An RGB color, written as `#RRGGBB` in the configuration file
#[derive(Copy, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const GRAY: Self = Self(128, 128, 128);
    pub const RED: Self = Self(197, 15, 31);
    pub const GREEN: Self = Self(19, 161, 14);
    pub const YELLOW: Self = Self(193, 156, 0);
    pub const MAGENTA: Self = Self(136, 23, 152);
    pub const CYAN: Self = Self(58, 150, 221);
    pub const BRIGHT_BLUE: Self = Self(59, 120, 255);

    pub const fn default_fg() -> Self {
        Self(0xC0, 0xC0, 0xC0)
    }

    const fn to_yansi(self) -> yansi::Color {
        let Self(r, g, b) = self;
        yansi::Color::RGB(r, g, b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::default_fg()
    }
}

impl std::str::FromStr for Color {
    type Err = anyhow::Error;

    fn from_str(input: &str) -> anyhow::Result<Self> {
        let input = input.trim();
        let hex = input.strip_prefix('#').unwrap_or(input);
        if hex.len() != 6 || !hex.bytes().all(|c| c.is_ascii_hexdigit()) {
            anyhow::bail!("invalid hex color: {}", input)
        }

        let [_, r, g, b] = u32::from_str_radix(hex, 16)?.to_be_bytes();
        Ok(Self(r, g, b))
    }
}

impl TryFrom<String> for Color {
    type Error = anyhow::Error;
    fn try_from(value: String) -> anyhow::Result<Self> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self(r, g, b) = self;
        write!(f, "#{r:02X}{g:02X}{b:02X}")
    }
}

impl std::fmt::Debug for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Color({self})")
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct ColorStyle {
    pub fg: Color,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg: Option<Color>,
    pub bold: bool,
}

impl ColorStyle {
    pub const fn new(fg: Color) -> Self {
        Self {
            fg,
            bg: None,
            bold: false,
        }
    }

    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    /// Wraps `item` so it is written with this style, when colors are enabled
    pub fn paint<T: Display>(self, item: T) -> yansi::Paint<T> {
        let paint = yansi::Paint::new(item).fg(self.fg.to_yansi());
        let paint = match self.bg {
            Some(bg) => paint.bg(bg.to_yansi()),
            None => paint,
        };
        if self.bold {
            paint.bold()
        } else {
            paint
        }
    }
}

impl Default for ColorStyle {
    fn default() -> Self {
        Self::new(Color::default_fg())
    }
}
