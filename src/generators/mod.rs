//! Lazy step generators, one per algorithm.
//!
//! Each generator takes its own copy of the values at construction and applies
//! every mutation it yields to that copy, so its comparisons always see the
//! same state observers see once the engine has applied the step. Generators
//! are finite and cannot be restarted; a new run builds a new one.

mod bubble;
mod insertion;
mod selection;

pub use bubble::BubbleSteps;
pub use insertion::InsertionSteps;
pub use selection::SelectionSteps;

use crate::step::Step;

pub type StepGenerator = Box<dyn Iterator<Item = Step>>;

/// Replay every mutation of `steps` onto `values`.
pub fn replay<I: IntoIterator<Item = Step>>(values: &mut [i32], steps: I) -> usize {
    let mut count = 0;
    for step in steps {
        if let Some(mutation) = step.mutation {
            mutation.apply_to_slice(values);
        }
        count += 1;
    }
    count
}
