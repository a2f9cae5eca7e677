use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::{algorithm::Algorithm, observer::Projection};

const ACTIVE_BG: Color = Color::Rgb(143, 235, 117);
const PANEL_BG: Color = Color::Rgb(77, 77, 77);

/// Columns needed to show the longest line plus borders and padding.
pub fn preferred_width(algorithm: Algorithm) -> u16 {
    let longest = algorithm
        .pseudocode()
        .iter()
        .map(|line| line.width())
        .max()
        .unwrap_or(0);
    u16::try_from(longest + 4).unwrap_or(u16::MAX)
}

/// Cut `line` to at most `width` display columns.
pub fn clip(line: &str, width: usize) -> String {
    let mut used = 0;
    line.chars()
        .take_while(|c| {
            used += c.width().unwrap_or(0);
            used <= width
        })
        .collect()
}

pub fn code_lines(algorithm: Algorithm, projection: &Projection, width: usize) -> Vec<Line<'static>> {
    algorithm
        .pseudocode()
        .iter()
        .enumerate()
        .map(|(idx, text)| {
            let style = if projection.is_line_active(idx) {
                Style::default()
                    .fg(Color::Black)
                    .bg(ACTIVE_BG)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            // pad so the highlight spans the whole row
            let clipped = clip(text, width);
            let pad = width.saturating_sub(clipped.width());
            Line::from(Span::styled(format!("{}{}", clipped, " ".repeat(pad)), style))
        })
        .collect()
}

/// The selected algorithm's pseudocode with the active lines highlighted.
pub struct CodePanel<'a> {
    pub algorithm: Algorithm,
    pub projection: &'a Projection,
}

impl Widget for CodePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.algorithm.title())
            .style(Style::default().bg(PANEL_BG));
        let width = block.inner(area).width as usize;

        Paragraph::new(code_lines(self.algorithm, self.projection, width))
            .block(block)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_respects_display_width() {
        assert_eq!(clip("for i = 0", 3), "for");
        assert_eq!(clip("abc", 10), "abc");
        assert_eq!(clip("日本語", 5), "日本");
        assert_eq!(clip("anything", 0), "");
    }

    #[test]
    fn active_lines_are_highlighted() {
        let mut projection = Projection::default();
        projection.active_lines.extend([1, 2]);

        let lines = code_lines(Algorithm::Insertion, &projection, 30);
        assert_eq!(lines.len(), 7);
        for (idx, line) in lines.iter().enumerate() {
            let bg = line.spans[0].style.bg;
            if idx == 1 || idx == 2 {
                assert_eq!(bg, Some(ACTIVE_BG));
            } else {
                assert_eq!(bg, None);
            }
        }
    }

    #[test]
    fn lines_are_padded_to_width() {
        let projection = Projection::default();
        let lines = code_lines(Algorithm::Bubble, &projection, 40);
        assert!(lines.iter().all(|l| l.width() == 40));
    }

    #[test]
    fn preferred_width_fits_longest_line() {
        let longest = Algorithm::Bubble
            .pseudocode()
            .iter()
            .map(|l| l.len())
            .max()
            .unwrap();
        assert_eq!(preferred_width(Algorithm::Bubble) as usize, longest + 4);
    }

    #[test]
    fn panel_renders_title_and_lines() {
        let projection = Projection::default();
        let area = Rect::new(0, 0, 45, 8);
        let mut buf = Buffer::empty(area);
        CodePanel {
            algorithm: Algorithm::Selection,
            projection: &projection,
        }
        .render(area, &mut buf);

        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Selection Sort"));
        assert!(text.contains("minIndex = i"));
    }
}
