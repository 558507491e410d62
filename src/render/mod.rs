use std::io::Write;

mod color;
pub use color::{Color, ColorStyle};

mod theme;
pub use theme::Theme;

mod style;
pub use style::Style;

mod entries;
pub use entries::{format_amount, Entries, Entry, Summarize};

pub trait Render {
    fn render(&self, writer: &mut dyn Write, style: &Style, theme: &Theme) -> anyhow::Result<()>;
}
