//! TextBlock Widget
//!
//! A borderless, wrapped text region, optionally centered. Used for the
//! placeholder notices and the rules popover.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

/// A borderless, wrapped text block
pub struct TextBlock<'a> {
    content: &'a str,
    style: Style,
    centered: bool,
}

impl<'a> TextBlock<'a> {
    /// Left-aligned text with the default style
    #[must_use]
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            style: Style::default(),
            centered: false,
        }
    }

    /// Set the style
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Center every line horizontally
    #[must_use]
    pub fn centered(mut self) -> Self {
        self.centered = true;
        self
    }

    /// Lines after wrapping to `width`
    #[must_use]
    pub fn wrapped_lines(&self, width: u16) -> Vec<String> {
        let width = usize::from(width.max(1));
        self.content
            .lines()
            .flat_map(|line| {
                if line.is_empty() {
                    vec![String::new()]
                } else {
                    wrap(line, width)
                        .into_iter()
                        .map(|cow| cow.to_string())
                        .collect()
                }
            })
            .collect()
    }
}

impl Widget for TextBlock<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        for (y, line) in (area.y..area.bottom()).zip(self.wrapped_lines(area.width)) {
            let x = if self.centered {
                let line_width = u16::try_from(line.width()).unwrap_or(area.width);
                area.x + area.width.saturating_sub(line_width) / 2
            } else {
                area.x
            };
            buf.set_stringn(x, y, &line, usize::from(area.right() - x), self.style);
        }
    }
}
