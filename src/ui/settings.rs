use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::app::{SettingsField, SettingsForm};
use crate::config::{BAR_COUNT_RANGE, DELAY_MS_RANGE, MAX_HEIGHT_RANGE, MIN_HEIGHT_RANGE};

const PANEL_WIDTH: u16 = 48;

fn label(field: SettingsField) -> String {
    match field {
        SettingsField::Algorithm => "Algorithm".to_string(),
        SettingsField::BarCount => format!(
            "Number of Bars ({}-{})",
            BAR_COUNT_RANGE.start(),
            BAR_COUNT_RANGE.end()
        ),
        SettingsField::MinHeight => format!(
            "Minimum Value ({}-{})",
            MIN_HEIGHT_RANGE.start(),
            MIN_HEIGHT_RANGE.end()
        ),
        SettingsField::MaxHeight => format!(
            "Maximum Value ({}-{})",
            MAX_HEIGHT_RANGE.start(),
            MAX_HEIGHT_RANGE.end()
        ),
        SettingsField::Delay => format!(
            "Delay ms ({}-{})",
            DELAY_MS_RANGE.start(),
            DELAY_MS_RANGE.end()
        ),
    }
}

fn value(form: &SettingsForm, field: SettingsField) -> String {
    let d = &form.draft;
    match field {
        SettingsField::Algorithm => d.algorithm.to_string(),
        SettingsField::BarCount => d.bar_count.to_string(),
        SettingsField::MinHeight => d.min_height.to_string(),
        SettingsField::MaxHeight => d.max_height.to_string(),
        SettingsField::Delay => d.delay_ms.to_string(),
    }
}

pub fn settings_lines(form: &SettingsForm) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = SettingsField::ALL
        .iter()
        .map(|field| {
            let selected = *field == form.selected;
            let style = if selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(if selected { "> " } else { "  " }, style),
                Span::styled(format!("{}: ", label(*field)), style),
                Span::styled(format!("< {} >", value(form, *field)), style),
            ])
        })
        .collect();

    lines.push(Line::default());
    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::from(Span::styled(
        "(up/down) select (left/right) change (enter) apply (esc) cancel",
        Style::default().add_modifier(Modifier::DIM),
    )));
    lines
}

pub struct SettingsPanel<'a> {
    pub form: &'a SettingsForm,
}

impl Widget for SettingsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = settings_lines(self.form);
        // rows after wrapping inside the borders
        let inner_width = (PANEL_WIDTH - 2) as usize;
        let rows: usize = lines
            .iter()
            .map(|l| l.width().max(1).div_ceil(inner_width))
            .sum();
        let height = u16::try_from(rows + 2).unwrap_or(u16::MAX);

        let [row] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);
        let [panel] = Layout::horizontal([Constraint::Length(PANEL_WIDTH)])
            .flex(Flex::Center)
            .areas(row);

        Clear.render(panel, buf);
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Settings"))
            .wrap(ratatui::widgets::Wrap { trim: true })
            .render(panel, buf);
    }
}
