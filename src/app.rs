use std::cell::RefCell;
use std::ops::RangeInclusive;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::algorithm::Algorithm;
use crate::config::{
    VisualizerConfig, BAR_COUNT_RANGE, DELAY_MS_RANGE, DELAY_MS_STEP, MAX_HEIGHT_RANGE,
    MIN_HEIGHT_RANGE,
};
use crate::engine::Engine;
use crate::error::Result;
use crate::observer::Projection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Visualizing,
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    Algorithm,
    BarCount,
    MinHeight,
    MaxHeight,
    Delay,
}

impl SettingsField {
    pub const ALL: [SettingsField; 5] = [
        SettingsField::Algorithm,
        SettingsField::BarCount,
        SettingsField::MinHeight,
        SettingsField::MaxHeight,
        SettingsField::Delay,
    ];

    pub fn next(self) -> Self {
        match self {
            SettingsField::Algorithm => SettingsField::BarCount,
            SettingsField::BarCount => SettingsField::MinHeight,
            SettingsField::MinHeight => SettingsField::MaxHeight,
            SettingsField::MaxHeight => SettingsField::Delay,
            SettingsField::Delay => SettingsField::Algorithm,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            SettingsField::Algorithm => SettingsField::Delay,
            SettingsField::BarCount => SettingsField::Algorithm,
            SettingsField::MinHeight => SettingsField::BarCount,
            SettingsField::MaxHeight => SettingsField::MinHeight,
            SettingsField::Delay => SettingsField::MaxHeight,
        }
    }
}

/// Pending edits made in the settings panel; applied on close.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsForm {
    pub draft: VisualizerConfig,
    pub selected: SettingsField,
    /// Why the last apply was rejected, shown until the draft changes.
    pub error: Option<String>,
}

impl SettingsForm {
    pub fn new(draft: VisualizerConfig) -> Self {
        Self {
            draft,
            selected: SettingsField::Algorithm,
            error: None,
        }
    }

    pub fn adjust(&mut self, up: bool) {
        self.error = None;
        let d = &mut self.draft;
        match self.selected {
            SettingsField::Algorithm => {
                d.algorithm = if up {
                    d.algorithm.next()
                } else {
                    d.algorithm.prev()
                };
            }
            SettingsField::BarCount => {
                d.bar_count = step_usize(d.bar_count, up, &BAR_COUNT_RANGE);
            }
            SettingsField::MinHeight => {
                d.min_height = step_i32(d.min_height, up, &MIN_HEIGHT_RANGE);
            }
            SettingsField::MaxHeight => {
                d.max_height = step_i32(d.max_height, up, &MAX_HEIGHT_RANGE);
            }
            SettingsField::Delay => {
                d.delay_ms = step_delay(d.delay_ms, up);
            }
        }
    }
}

fn step_usize(value: usize, up: bool, range: &RangeInclusive<usize>) -> usize {
    let next = if up {
        value.saturating_add(1)
    } else {
        value.saturating_sub(1)
    };
    next.clamp(*range.start(), *range.end())
}

fn step_i32(value: i32, up: bool, range: &RangeInclusive<i32>) -> i32 {
    let next = if up { value + 1 } else { value - 1 };
    next.clamp(*range.start(), *range.end())
}

fn step_delay(delay_ms: u64, up: bool) -> u64 {
    let next = if up {
        delay_ms.saturating_add(DELAY_MS_STEP)
    } else {
        delay_ms.saturating_sub(DELAY_MS_STEP)
    };
    next.clamp(*DELAY_MS_RANGE.start(), *DELAY_MS_RANGE.end())
}

#[derive(Debug)]
pub struct App {
    pub engine: Engine,
    pub projection: Rc<RefCell<Projection>>,
    pub state: AppState,
    pub settings: SettingsForm,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: VisualizerConfig) -> Result<Self> {
        Ok(Self::with_engine(Engine::new(config)?))
    }

    pub fn with_engine(mut engine: Engine) -> Self {
        let projection = Rc::new(RefCell::new(Projection::default()));
        engine.subscribe(Box::new(Rc::clone(&projection)));
        let settings = SettingsForm::new(engine.config().clone());
        Self {
            engine,
            projection,
            state: AppState::Visualizing,
            settings,
            should_quit: false,
        }
    }

    /// Algorithm whose pseudocode should be on screen: the in-flight one,
    /// otherwise the configured one.
    pub fn displayed_algorithm(&self) -> Algorithm {
        self.engine
            .running_algorithm()
            .unwrap_or(self.engine.config().algorithm)
    }

    pub fn next_timeout(&self, now: Instant) -> Option<Duration> {
        self.engine.time_until_next_step(now)
    }

    pub fn on_tick(&mut self, now: Instant) -> bool {
        self.engine.tick(now)
    }

    /// Returns true when the screen needs redrawing.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return false;
        }

        match self.state {
            AppState::Visualizing => self.handle_visualizing_key(key),
            AppState::Settings => self.handle_settings_key(key),
        }
        true
    }

    fn handle_visualizing_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char(' ') => self.engine.toggle(),
            KeyCode::Char('r') => {
                let config = self.engine.config().clone();
                // the current config was validated when it was applied
                if let Err(e) = self.engine.reset(config) {
                    tracing::warn!(error = %e, "reset failed");
                }
            }
            KeyCode::Char('s') => {
                self.settings = SettingsForm::new(self.engine.config().clone());
                self.state = AppState::Settings;
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let delay = step_delay(self.engine.config().delay_ms, true);
                self.engine.set_delay(Duration::from_millis(delay));
            }
            KeyCode::Char('-') => {
                let delay = step_delay(self.engine.config().delay_ms, false);
                self.engine.set_delay(Duration::from_millis(delay));
            }
            _ => {}
        }
    }

    fn handle_settings_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.state = AppState::Visualizing,
            KeyCode::Up | KeyCode::Char('k') => {
                self.settings.selected = self.settings.selected.prev()
            }
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
                self.settings.selected = self.settings.selected.next()
            }
            KeyCode::Left | KeyCode::Char('h') => self.settings.adjust(false),
            KeyCode::Right | KeyCode::Char('l') => self.settings.adjust(true),
            KeyCode::Enter | KeyCode::Char('s') => self.apply_settings(),
            _ => {}
        }
    }

    /// Closing the settings panel always resets with the edited values.
    fn apply_settings(&mut self) {
        match self.engine.reset(self.settings.draft.clone()) {
            Ok(()) => self.state = AppState::Visualizing,
            Err(e) => {
                tracing::warn!(error = %e, "settings rejected");
                self.settings.error = Some(e.to_string());
            }
        }
    }
}
