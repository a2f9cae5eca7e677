pub mod bars;
pub mod code_panel;
pub mod settings;

use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
    Frame,
};

use crate::{
    app::{App, AppState},
    engine::EngineState,
};

const HORIZONTAL_MARGIN: u16 = 1;

pub fn draw(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let algorithm = self.displayed_algorithm();
        let projection = self.projection.borrow();
        let config = self.engine.config();

        let code_height = algorithm.pseudocode().len() as u16 + 2;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints([
                Constraint::Min(3),              // bars
                Constraint::Length(code_height), // info + pseudocode
                Constraint::Length(1),           // status
            ])
            .split(area);

        bars::BarsView {
            values: self.engine.model().values(),
            max_height: config.max_height,
            projection: &projection,
        }
        .render(chunks[0], buf);

        let code_width = code_panel::preferred_width(algorithm).min(chunks[1].width);
        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(code_width)])
            .split(chunks[1]);

        let highlighted = projection.highlighted.iter().join(", ");
        let info = vec![
            Line::from(vec![
                Span::styled("values  ", Style::default().add_modifier(Modifier::DIM)),
                Span::raw(self.engine.model().values().iter().join(" ")),
            ]),
            Line::from(vec![
                Span::styled("focus   ", Style::default().add_modifier(Modifier::DIM)),
                Span::raw(if highlighted.is_empty() {
                    "-".to_string()
                } else {
                    format!("[{}]", highlighted)
                }),
            ]),
            Line::from(vec![
                Span::styled("steps   ", Style::default().add_modifier(Modifier::DIM)),
                Span::raw(self.engine.steps_published().to_string()),
            ]),
        ];
        Paragraph::new(info)
            .block(Block::default().borders(Borders::ALL).title("Array"))
            .wrap(Wrap { trim: true })
            .render(bottom[0], buf);

        code_panel::CodePanel {
            algorithm,
            projection: &projection,
        }
        .render(bottom[1], buf);

        status_line(self).render(chunks[2], buf);

        if self.state == AppState::Settings {
            settings::SettingsPanel {
                form: &self.settings,
            }
            .render(area, buf);
        }
    }
}

fn status_line(app: &App) -> Paragraph<'static> {
    let engine = &app.engine;
    let (state_text, state_style) = match (engine.state(), engine.failure()) {
        (EngineState::Finished, Some(e)) => (
            format!("Failed: {}", e),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        (EngineState::Running, _) => (
            "Running".to_string(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        (EngineState::Paused, _) => (
            "Paused".to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        (state, _) => (state.to_string(), Style::default().add_modifier(Modifier::BOLD)),
    };

    let dim = Style::default().add_modifier(Modifier::DIM);
    Paragraph::new(Line::from(vec![
        Span::styled(app.displayed_algorithm().title(), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(state_text, state_style),
        Span::raw(format!(
            "  delay {}ms  steps {}  ",
            engine.config().delay_ms,
            engine.steps_published()
        )),
        Span::styled(
            "(space) play/pause (r) reset (s) settings (+/-) delay (q) quit",
            dim,
        ),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::Algorithm;
    use crate::config::VisualizerConfig;
    use crate::engine::Engine;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn create_test_app(values: Vec<i32>) -> App {
        let config = VisualizerConfig {
            delay_ms: 0,
            ..Default::default()
        };
        App::with_engine(Engine::with_values(config, values).unwrap())
    }

    fn rendered(app: &App, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn idle_screen_shows_pseudocode_and_state() {
        let app = create_test_app(vec![5, 3, 4, 1, 2]);
        let text = rendered(&app, 100, 30);
        assert!(text.contains("Bubble Sort"));
        assert!(text.contains("Idle"));
        assert!(text.contains("if leftSide > rightSide"));
        assert!(text.contains("5 3 4 1 2"));
    }

    #[test]
    fn running_screen_shows_focus() {
        let mut app = create_test_app(vec![5, 3, 4, 1, 2]);
        app.handle_key(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE));
        for _ in 0..3 {
            app.engine.step_now();
        }
        let text = rendered(&app, 100, 30);
        assert!(text.contains("Running"));
        assert!(text.contains("[0, 1]"));
        assert!(text.contains("steps 3"));
    }

    #[test]
    fn settings_overlay_is_drawn() {
        let mut app = create_test_app(vec![2, 1]);
        app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE));
        let text = rendered(&app, 100, 30);
        assert!(text.contains("Settings"));
        assert!(text.contains("Number of Bars (4-60)"));
    }

    #[test]
    fn pseudocode_follows_configured_algorithm() {
        let mut app = create_test_app(vec![2, 1]);
        app.engine.set_algorithm(Algorithm::Insertion);
        let text = rendered(&app, 100, 30);
        assert!(text.contains("while j >= 0 && arr[j] > key"));
    }

    #[test]
    fn finished_state_is_reported() {
        let mut app = create_test_app(vec![2, 1]);
        app.handle_key(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE));
        app.engine.run_to_end();
        let text = rendered(&app, 100, 30);
        assert!(text.contains("Finished"));
    }

    #[test]
    fn tiny_area_does_not_panic() {
        let app = create_test_app((1..=60).collect());
        let area = Rect::new(0, 0, 10, 4);
        let mut buffer = Buffer::empty(area);
        (&app).render(area, &mut buffer);
        assert!(*buffer.area() == area);
    }
}
