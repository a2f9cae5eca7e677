//! Execution engine: drives one step generator at a time.
//!
//! The engine never sleeps. It reports when the next step is due
//! ([`Engine::time_until_next_step`]) and the event loop waits for that long
//! or until user input arrives, then calls [`Engine::tick`]. A pending wait is
//! cancelled simply by the loop handling a `start`/`toggle`/`reset` first: the
//! old generator is dropped before the loop ever comes back to `tick`.
//!
//! ```text
//! Idle --start/toggle--> Running <--toggle--> Paused
//!   ^                       |
//!   |                 exhausted / error
//!   |                       v
//!   +-------reset------- Finished
//! ```

use std::time::{Duration, Instant};

use crate::algorithm::Algorithm;
use crate::array::ArrayModel;
use crate::config::VisualizerConfig;
use crate::error::{Result, SortError};
use crate::generators::StepGenerator;
use crate::observer::{SessionId, StepObserver};
use crate::step::Step;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum EngineState {
    Idle,
    Running,
    Paused,
    Finished,
}

struct ActiveRun {
    algorithm: Algorithm,
    steps: StepGenerator,
}

pub struct Engine {
    config: VisualizerConfig,
    model: ArrayModel,
    state: EngineState,
    session: SessionId,
    run: Option<ActiveRun>,
    observers: Vec<Box<dyn StepObserver>>,
    current: Option<Step>,
    steps_published: usize,
    failure: Option<SortError>,
    next_due: Option<Instant>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("model", &self.model)
            .field("state", &self.state)
            .field("session", &self.session)
            .field("observers", &self.observers.len())
            .field("steps_published", &self.steps_published)
            .field("failure", &self.failure)
            .finish()
    }
}

impl Engine {
    /// Build an idle engine over a freshly randomised array.
    pub fn new(config: VisualizerConfig) -> Result<Self> {
        config.validate()?;
        let mut model = ArrayModel::default();
        model.reset(config.bar_count, config.min_height, config.max_height)?;
        Ok(Self::with_model(config, model))
    }

    /// Build an idle engine over the given values.
    pub fn with_values(config: VisualizerConfig, values: Vec<i32>) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_model(config, ArrayModel::from_values(values)))
    }

    fn with_model(config: VisualizerConfig, model: ArrayModel) -> Self {
        Self {
            config,
            model,
            state: EngineState::Idle,
            session: 0,
            run: None,
            observers: Vec::new(),
            current: None,
            steps_published: 0,
            failure: None,
            next_due: None,
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn StepObserver>) {
        self.observers.push(observer);
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn model(&self) -> &ArrayModel {
        &self.model
    }

    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    /// The most recently published step of the current run.
    pub fn current_step(&self) -> Option<&Step> {
        self.current.as_ref()
    }

    pub fn steps_published(&self) -> usize {
        self.steps_published
    }

    /// Set when the last run was aborted by an error.
    pub fn failure(&self) -> Option<&SortError> {
        self.failure.as_ref()
    }

    /// Algorithm of the in-flight run, which may differ from the configured one.
    pub fn running_algorithm(&self) -> Option<Algorithm> {
        self.run.as_ref().map(|run| run.algorithm)
    }

    /// Takes effect on the next `start`/`toggle` from idle.
    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.config.algorithm = algorithm;
    }

    /// Takes effect from the next wait; a wait already scheduled is kept.
    pub fn set_delay(&mut self, delay: Duration) {
        self.config.delay_ms = delay.as_millis().try_into().unwrap_or(u64::MAX);
    }

    /// Start a new run of `algorithm` over the current values. An in-flight
    /// run is cancelled first.
    pub fn start(&mut self, algorithm: Algorithm) {
        let steps = algorithm.steps(self.model.values());
        self.begin_run(algorithm, steps);
    }

    pub fn start_named(&mut self, name: &str) -> Result<()> {
        let algorithm = name.parse::<Algorithm>()?;
        self.start(algorithm);
        Ok(())
    }

    fn begin_run(&mut self, algorithm: Algorithm, steps: StepGenerator) {
        if self.run.is_some() {
            tracing::info!(session = self.session, "cancelling run for restart");
            self.discard_run();
            self.publish_cleared();
        }

        self.session += 1;
        self.run = Some(ActiveRun { algorithm, steps });
        self.state = EngineState::Running;
        self.current = None;
        self.steps_published = 0;
        self.failure = None;
        self.next_due = None;
        tracing::info!(
            session = self.session,
            %algorithm,
            len = self.model.len(),
            "run started"
        );
    }

    /// Play/pause. From idle this starts the configured algorithm.
    pub fn toggle(&mut self) {
        match self.state {
            EngineState::Idle => self.start(self.config.algorithm),
            EngineState::Running => {
                self.state = EngineState::Paused;
                tracing::debug!(session = self.session, "paused");
            }
            EngineState::Paused => {
                // the pending deadline is kept; a wait interrupted by the
                // pause still runs to completion
                self.state = EngineState::Running;
                tracing::debug!(session = self.session, "resumed");
            }
            EngineState::Finished => {}
        }
    }

    /// Discard any run, re-randomise the values per `config`, and go idle.
    /// An invalid config is rejected with nothing changed.
    pub fn reset(&mut self, config: VisualizerConfig) -> Result<()> {
        config.validate()?;
        self.model
            .reset(config.bar_count, config.min_height, config.max_height)?;
        self.config = config;
        self.go_idle();
        tracing::info!(
            bars = self.config.bar_count,
            min = self.config.min_height,
            max = self.config.max_height,
            "reset"
        );
        Ok(())
    }

    /// Like [`Engine::reset`] but with explicit values instead of random ones.
    pub fn load_values(&mut self, values: Vec<i32>) {
        self.model = ArrayModel::from_values(values);
        self.go_idle();
    }

    fn go_idle(&mut self) {
        self.discard_run();
        self.state = EngineState::Idle;
        self.current = None;
        self.steps_published = 0;
        self.failure = None;
        self.publish_cleared();
    }

    fn discard_run(&mut self) {
        self.run = None;
        self.next_due = None;
    }

    /// How long the event loop may wait before calling [`Engine::tick`].
    /// `None` means no step will come without user input.
    pub fn time_until_next_step(&self, now: Instant) -> Option<Duration> {
        if self.state != EngineState::Running {
            return None;
        }
        Some(
            self.next_due
                .map(|due| due.saturating_duration_since(now))
                .unwrap_or(Duration::ZERO),
        )
    }

    /// Publish the next step if one is due. Returns true when observers were
    /// notified.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.state != EngineState::Running {
            return false;
        }
        if matches!(self.next_due, Some(due) if now < due) {
            return false;
        }
        self.advance(now);
        true
    }

    /// Publish the next step regardless of the delay. No-op unless running.
    pub fn step_now(&mut self) -> bool {
        if self.state != EngineState::Running {
            return false;
        }
        self.advance(Instant::now());
        true
    }

    fn advance(&mut self, now: Instant) {
        let next = match self.run.as_mut() {
            Some(run) => run.steps.next(),
            None => None,
        };

        let Some(step) = next else {
            self.finish(None);
            return;
        };

        if let Some(mutation) = step.mutation {
            if let Err(e) = mutation.apply(&mut self.model) {
                self.finish(Some(e));
                return;
            }
        }

        tracing::debug!(
            session = self.session,
            lines = ?step.lines,
            highlighted = ?step.highlighted,
            "step"
        );
        for observer in self.observers.iter_mut() {
            observer.on_step(self.session, &step, &self.model);
        }
        self.current = Some(step);
        self.steps_published += 1;
        self.next_due = Some(now + self.config.delay());
    }

    fn finish(&mut self, failure: Option<SortError>) {
        match &failure {
            Some(e) => tracing::warn!(session = self.session, error = %e, "run aborted"),
            None => tracing::info!(
                session = self.session,
                steps = self.steps_published,
                "run finished"
            ),
        }
        self.discard_run();
        self.state = EngineState::Finished;
        self.current = None;
        self.failure = failure;
        self.publish_cleared();
    }

    fn publish_cleared(&mut self) {
        for observer in self.observers.iter_mut() {
            observer.on_cleared(self.session);
        }
    }

    /// Drive the current run to completion without waiting.
    pub fn run_to_end(&mut self) {
        while self.state == EngineState::Running {
            self.advance(Instant::now());
        }
    }
}
