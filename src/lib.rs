//! Step-by-step visualizer for comparison sorts.
//!
//! Each algorithm is a lazy [`generators`] state machine yielding
//! [`step::Step`]s: the active pseudocode lines, the array positions of
//! interest, and an optional mutation. The [`engine::Engine`] pulls steps at
//! the configured pace, applies their mutations to the shared
//! [`array::ArrayModel`], and pushes them to [`observer::StepObserver`]s such
//! as the terminal UI.

// Library surface for headless/integration tests and reuse.
pub mod algorithm;
pub mod app;
pub mod array;
pub mod config;
pub mod engine;
pub mod error;
pub mod generators;
pub mod logging;
pub mod observer;
pub mod runtime;
pub mod step;
pub mod ui;

pub use algorithm::Algorithm;
pub use engine::{Engine, EngineState};
pub use error::{Result, SortError};
