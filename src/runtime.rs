use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    /// The requested wait elapsed without input.
    Tick,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait AppEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;

    /// Block until an event arrives. Err(Disconnected) once the source is gone.
    fn recv(&self) -> Result<AppEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            match event::read() {
                // key release/repeat events would double-toggle on some terminals
                Ok(CtEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                    if tx.send(AppEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if tx.send(AppEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl AppEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    fn recv(&self) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv().map_err(|_| RecvTimeoutError::Disconnected)
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<AppEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl AppEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    fn recv(&self) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv().map_err(|_| RecvTimeoutError::Disconnected)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunnerError {
    /// The event source hung up while nothing else could wake the runner.
    Disconnected,
}

/// Runner that advances the application one event/wait at a time
pub struct Runner<E: AppEventSource> {
    event_source: E,
}

impl<E: AppEventSource> Runner<E> {
    pub fn new(event_source: E) -> Self {
        Self { event_source }
    }

    /// Blocks until the next event, or until `timeout` elapses (returning Tick).
    /// With no timeout it blocks on input alone, which is how a paused or idle
    /// engine waits without spinning.
    pub fn step(&self, timeout: Option<Duration>) -> Result<AppEvent, RunnerError> {
        match timeout {
            Some(timeout) => match self.event_source.recv_timeout(timeout) {
                Ok(ev) => Ok(ev),
                Err(RecvTimeoutError::Timeout) => Ok(AppEvent::Tick),
                // input is gone but the engine can still make progress
                Err(RecvTimeoutError::Disconnected) => {
                    std::thread::sleep(timeout);
                    Ok(AppEvent::Tick)
                }
            },
            None => self
                .event_source
                .recv()
                .map_err(|_| RunnerError::Disconnected),
        }
    }
}
