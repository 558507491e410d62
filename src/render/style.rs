#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Style {
    pub top: &'static str,
    pub entry_sep: &'static str,
    pub field: &'static str,
    pub end: &'static str,
}

impl Style {
    pub const NONE: Self = Self {
        top: "",
        entry_sep: "",
        field: "",
        end: "",
    };

    pub const BOX: Self = Self {
        top: "┌── ",
        entry_sep: "│",
        field: "├ ",
        end: "└ ",
    };

    pub const FANCY: Self = Self {
        top: "╭╍╍ ",
        entry_sep: "╎",
        field: "├┄ ",
        end: "╰╍ ",
    };
}

impl Default for Style {
    fn default() -> Self {
        Self::BOX
    }
}

impl std::str::FromStr for Style {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> anyhow::Result<Self> {
        Ok(match s {
            "none" => Self::NONE,
            "box" => Self::BOX,
            "fancy" => Self::FANCY,
            style => anyhow::bail!(
                "invalid style: {}. supported styles: [none | box | fancy]",
                style
            ),
        })
    }
}
