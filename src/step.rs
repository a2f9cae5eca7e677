use std::collections::BTreeSet;

use crate::array::ArrayModel;
use crate::error::Result;

/// Pseudocode line indices active for a step. Always a set, possibly a singleton.
pub type LineSet = BTreeSet<usize>;

/// A data change carried by a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Swap(usize, usize),
    Set { index: usize, value: i32 },
}

impl Mutation {
    pub fn apply(&self, model: &mut ArrayModel) -> Result<()> {
        match *self {
            Mutation::Swap(i, j) => model.swap(i, j),
            Mutation::Set { index, value } => model.set(index, value),
        }
    }

    /// Apply to a plain slice; used by generators on their private working copy.
    pub(crate) fn apply_to_slice(&self, values: &mut [i32]) {
        match *self {
            Mutation::Swap(i, j) => values.swap(i, j),
            Mutation::Set { index, value } => values[index] = value,
        }
    }
}

/// One published unit of algorithm progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub lines: LineSet,
    pub highlighted: BTreeSet<usize>,
    pub mutation: Option<Mutation>,
}

impl Step {
    pub fn at_line(line: usize) -> Self {
        Self::at_lines(&[line])
    }

    pub fn at_lines(lines: &[usize]) -> Self {
        Self {
            lines: lines.iter().copied().collect(),
            highlighted: BTreeSet::new(),
            mutation: None,
        }
    }

    pub fn highlight(mut self, positions: &[usize]) -> Self {
        self.highlighted.extend(positions.iter().copied());
        self
    }

    pub fn with_mutation(mut self, mutation: Mutation) -> Self {
        self.mutation = Some(mutation);
        self
    }
}
