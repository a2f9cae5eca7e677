use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Widget},
};

use crate::observer::Projection;

/// Value labels get unreadable past this many bars.
pub const LABEL_LIMIT: usize = 25;

const HIGHLIGHT: Color = Color::Green;
const NORMAL: Color = Color::White;

/// Bar width and gap that fit `count` bars into `width` columns.
pub fn bar_layout(width: u16, count: usize) -> (u16, u16) {
    if count == 0 {
        return (1, 0);
    }
    let count = u16::try_from(count).unwrap_or(u16::MAX);
    let gap = if width >= count.saturating_mul(2) { 1 } else { 0 };
    let gaps = gap * (count - 1);
    let bar_width = (width.saturating_sub(gaps) / count).max(1);
    (bar_width, gap)
}

/// One bar per value, highlighted positions in green.
pub struct BarsView<'a> {
    pub values: &'a [i32],
    pub max_height: i32,
    pub projection: &'a Projection,
}

impl Widget for BarsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default().borders(Borders::ALL);
        let inner = block.inner(area);
        block.render(area, buf);

        let (bar_width, bar_gap) = bar_layout(inner.width, self.values.len());
        let show_labels = self.values.len() < LABEL_LIMIT;

        let bars: Vec<Bar> = self
            .values
            .iter()
            .enumerate()
            .map(|(idx, value)| {
                let color = if self.projection.is_highlighted(idx) {
                    HIGHLIGHT
                } else {
                    NORMAL
                };
                let bar = Bar::default()
                    .value((*value).max(0) as u64)
                    .style(Style::default().fg(color))
                    .value_style(
                        Style::default()
                            .fg(Color::Black)
                            .bg(color)
                            .add_modifier(Modifier::BOLD),
                    );
                if show_labels {
                    bar.text_value(value.to_string())
                } else {
                    bar.text_value(String::new())
                }
            })
            .collect();

        BarChart::default()
            .data(BarGroup::default().bars(&bars))
            .bar_width(bar_width)
            .bar_gap(bar_gap)
            .max(self.max_height.max(1) as u64)
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_with_room_for_gaps() {
        assert_eq!(bar_layout(100, 10), (9, 1));
    }

    #[test]
    fn layout_too_narrow_drops_gaps() {
        assert_eq!(bar_layout(30, 20), (1, 0));
        assert_eq!(bar_layout(20, 60), (1, 0));
    }

    #[test]
    fn layout_rederives_when_count_changes() {
        let (wide, _) = bar_layout(120, 4);
        let (narrow, _) = bar_layout(120, 40);
        assert!(wide > narrow);
    }

    #[test]
    fn highlighted_bar_is_green() {
        let mut projection = Projection::default();
        projection.highlighted.insert(1);
        let values = [2, 4];
        let area = Rect::new(0, 0, 12, 8);
        let mut buf = Buffer::empty(area);

        BarsView {
            values: &values,
            max_height: 4,
            projection: &projection,
        }
        .render(area, &mut buf);

        let colors: Vec<Color> = buf.content().iter().map(|c| c.fg).collect();
        assert!(colors.contains(&Color::Green));
        assert!(colors.contains(&Color::White));
    }

    #[test]
    fn labels_hidden_for_many_bars() {
        let projection = Projection::default();
        let values: Vec<i32> = vec![7; LABEL_LIMIT];
        let area = Rect::new(0, 0, 80, 10);
        let mut buf = Buffer::empty(area);

        BarsView {
            values: &values,
            max_height: 7,
            projection: &projection,
        }
        .render(area, &mut buf);

        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(!text.contains('7'));
    }
}
