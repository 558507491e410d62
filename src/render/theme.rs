use super::{Color, ColorStyle};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Theme {
    pub fringe: ColorStyle,
    pub id: ColorStyle,
    pub description: ColorStyle,
    pub credit: ColorStyle,
    pub debit: ColorStyle,
    pub status: ColorStyle,
    pub timestamp: ColorStyle,
}

impl Theme {
    pub const fn standard() -> Self {
        Self {
            fringe: ColorStyle::new(Color::GRAY).bold(),
            id: ColorStyle::new(Color::BRIGHT_BLUE).bold(),
            description: ColorStyle::new(Color::YELLOW).bold(),
            credit: ColorStyle::new(Color::GREEN),
            debit: ColorStyle::new(Color::RED),
            status: ColorStyle::new(Color::MAGENTA),
            timestamp: ColorStyle::new(Color::CYAN),
        }
    }

    /// Picks the credit or debit style by the sign of `amount`
    pub const fn amount(&self, amount: i64) -> ColorStyle {
        if amount < 0 {
            self.debit
        } else {
            self.credit
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_matches_the_standard_theme() {
        let config = crate::Config::from_toml(crate::Config::default_formatted_toml()).unwrap();
        assert_eq!(config.appearance.colors, Theme::standard());
    }

    #[test]
    fn missing_keys_use_the_standard_theme() {
        let theme: Theme = toml::from_str(r##"debit = { fg = "#FF0000" }"##).unwrap();
        assert_eq!(theme.debit, ColorStyle::new(Color(255, 0, 0)));
        assert_eq!(theme.credit, Theme::standard().credit);
    }
}
