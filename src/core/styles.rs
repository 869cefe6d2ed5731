//! Terminal styling for the text formatter
//!
//! A [`Styles`] table holds one [`Style`] per output component and one per
//! level. Truncation (`max_width`) is applied whenever the text formatter
//! renders; colors only when the sink is a terminal.

use super::level::Level;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

/// Foreground colors supported by the text formatter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
}

#[cfg(feature = "console")]
impl From<Color> for colored::Color {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => colored::Color::Black,
            Color::Red => colored::Color::Red,
            Color::Green => colored::Color::Green,
            Color::Yellow => colored::Color::Yellow,
            Color::Blue => colored::Color::Blue,
            Color::Magenta => colored::Color::Magenta,
            Color::Cyan => colored::Color::Cyan,
            Color::White => colored::Color::White,
            Color::BrightBlack => colored::Color::BrightBlack,
            Color::BrightRed => colored::Color::BrightRed,
        }
    }
}

/// Cosmetic attributes of one rendered component
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    pub color: Option<Color>,
    pub bold: bool,
    pub faint: bool,
    /// Maximum rendered width in characters; longer text is truncated
    pub max_width: Option<usize>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    #[must_use]
    pub fn with_faint(mut self, faint: bool) -> Self {
        self.faint = faint;
        self
    }

    #[must_use]
    pub fn with_max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }

    /// Render `text`, truncating to `max_width` and applying colors when
    /// `colorize` is set.
    pub fn render(&self, text: &str, colorize: bool) -> String {
        let text = truncate(text, self.max_width);
        if !colorize {
            return text.into_owned();
        }
        self.paint(&text)
    }

    #[cfg(feature = "console")]
    fn paint(&self, text: &str) -> String {
        use colored::Colorize;

        let mut painted = text.normal();
        if let Some(color) = self.color {
            painted = painted.color(colored::Color::from(color));
        }
        if self.bold {
            painted = painted.bold();
        }
        if self.faint {
            painted = painted.dimmed();
        }
        painted.to_string()
    }

    #[cfg(not(feature = "console"))]
    fn paint(&self, text: &str) -> String {
        text.to_string()
    }
}

fn truncate(text: &str, max_width: Option<usize>) -> Cow<'_, str> {
    match max_width {
        Some(width) => match text.char_indices().nth(width) {
            Some((idx, _)) => Cow::Borrowed(&text[..idx]),
            None => Cow::Borrowed(text),
        },
        None => Cow::Borrowed(text),
    }
}

/// Style table used by the text formatter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Styles {
    pub timestamp: Style,
    pub caller: Style,
    pub prefix: Style,
    pub message: Style,
    pub key: Style,
    pub value: Style,
    pub separator: Style,
    pub levels: BTreeMap<Level, Style>,
}

impl Styles {
    /// The engine's base table. Level labels are truncated to four
    /// characters (`DEBU`, `ERRO`, `FATA`).
    pub fn base() -> Self {
        let levels = Level::ALL
            .iter()
            .map(|level| {
                let style = Style::new()
                    .with_color(level.color())
                    .with_bold(true)
                    .with_max_width(4);
                (*level, style)
            })
            .collect();

        Self {
            timestamp: Style::new(),
            caller: Style::new().with_faint(true),
            prefix: Style::new().with_bold(true).with_faint(true),
            message: Style::new(),
            key: Style::new().with_faint(true),
            value: Style::new(),
            separator: Style::new().with_faint(true),
            levels,
        }
    }

    pub fn level(&self, level: Level) -> Cow<'_, Style> {
        match self.levels.get(&level) {
            Some(style) => Cow::Borrowed(style),
            None => Cow::Owned(Style::new()),
        }
    }

    /// Maximum label width configured for `level`
    pub fn level_max_width(&self, level: Level) -> Option<usize> {
        self.levels.get(&level).and_then(|style| style.max_width)
    }

    #[must_use]
    pub fn with_level(mut self, level: Level, style: Style) -> Self {
        self.levels.insert(level, style);
        self
    }
}

impl Default for Styles {
    fn default() -> Self {
        Self::base()
    }
}

static DEFAULT_STYLES: OnceLock<Arc<Styles>> = OnceLock::new();

/// The process-wide default style table.
///
/// Computed once from [`Styles::base`] with label widths widened so every
/// level renders untruncated. Every call returns the same `Arc`; the table
/// is shared read-only, clone it to customize.
pub fn default_styles() -> Arc<Styles> {
    DEFAULT_STYLES
        .get_or_init(|| {
            const WIDTHS: [(Level, usize); 5] = [
                (Level::Debug, 5),
                (Level::Info, 4),
                (Level::Warn, 4),
                (Level::Error, 5),
                (Level::Fatal, 5),
            ];

            let mut styles = Styles::base();
            for (level, width) in WIDTHS {
                let style = styles.level(level).into_owned().with_max_width(width);
                styles.levels.insert(level, style);
            }
            Arc::new(styles)
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("ERROR", Some(4)), "ERRO");
        assert_eq!(truncate("INFO", Some(4)), "INFO");
        assert_eq!(truncate("héllo", Some(2)), "hé");
        assert_eq!(truncate("anything", None), "anything");
    }

    #[test]
    fn test_render_without_color_is_plain() {
        let style = Style::new().with_color(Color::Red).with_bold(true);
        assert_eq!(style.render("ERROR", false), "ERROR");
    }

    #[test]
    fn test_base_table_truncates_labels() {
        let styles = Styles::base();
        let rendered = styles.level(Level::Debug).render(Level::Debug.to_str(), false);
        assert_eq!(rendered, "DEBU");
    }

    #[test]
    fn test_default_styles_widths() {
        let styles = default_styles();
        assert_eq!(styles.level_max_width(Level::Debug), Some(5));
        assert_eq!(styles.level_max_width(Level::Info), Some(4));
        assert_eq!(styles.level_max_width(Level::Warn), Some(4));
        assert_eq!(styles.level_max_width(Level::Error), Some(5));
        assert_eq!(styles.level_max_width(Level::Fatal), Some(5));
    }

    #[test]
    fn test_default_styles_inherit_base_attributes() {
        let base = Styles::base();
        let styles = default_styles();
        for level in Level::ALL {
            assert_eq!(styles.level(level).color, base.level(level).color);
            assert_eq!(styles.level(level).bold, base.level(level).bold);
        }
        assert_eq!(styles.key, base.key);
    }

    #[test]
    fn test_default_styles_cached() {
        assert!(Arc::ptr_eq(&default_styles(), &default_styles()));
    }

    #[test]
    fn test_default_labels_render_whole() {
        let styles = default_styles();
        for level in Level::ALL {
            assert_eq!(styles.level(level).render(level.to_str(), false), level.to_str());
        }
    }
}
