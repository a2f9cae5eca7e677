use crate::step::{Mutation, Step};

const OUTER_LOOP: usize = 0;
const KEY_ASSIGN: &[usize] = &[1, 2];
const WHILE_CHECK: usize = 3;
const SHIFT: &[usize] = &[4, 5];
const PLACE_KEY: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Outer,
    Key,
    WhileCheck,
    Shift,
    Place,
    Done,
}

/// Insertion sort. `hole` is always `j + 1`, which keeps the index unsigned
/// when `j` walks past the front of the array.
#[derive(Debug)]
pub struct InsertionSteps {
    values: Vec<i32>,
    i: usize,
    key: i32,
    hole: usize,
    phase: Phase,
}

impl InsertionSteps {
    pub fn new(values: Vec<i32>) -> Self {
        Self {
            values,
            i: 1,
            key: 0,
            hole: 0,
            phase: Phase::Outer,
        }
    }
}

impl Iterator for InsertionSteps {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        loop {
            match self.phase {
                Phase::Done => return None,
                Phase::Outer => {
                    if self.i >= self.values.len() {
                        self.phase = Phase::Done;
                        continue;
                    }
                    self.phase = Phase::Key;
                    return Some(Step::at_line(OUTER_LOOP));
                }
                Phase::Key => {
                    self.key = self.values[self.i];
                    self.hole = self.i;
                    self.phase = Phase::WhileCheck;
                    return Some(Step::at_lines(KEY_ASSIGN).highlight(&[self.i]));
                }
                Phase::WhileCheck => {
                    if self.hole > 0 && self.values[self.hole - 1] > self.key {
                        self.phase = Phase::Shift;
                        return Some(Step::at_line(WHILE_CHECK).highlight(&[self.hole - 1]));
                    }
                    self.phase = Phase::Place;
                }
                Phase::Shift => {
                    let j = self.hole - 1;
                    let mutation = Mutation::Set {
                        index: self.hole,
                        value: self.values[j],
                    };
                    mutation.apply_to_slice(&mut self.values);
                    self.hole = j;
                    self.phase = Phase::WhileCheck;
                    return Some(
                        Step::at_lines(SHIFT)
                            .highlight(&[j, j + 1])
                            .with_mutation(mutation),
                    );
                }
                Phase::Place => {
                    let mutation = Mutation::Set {
                        index: self.hole,
                        value: self.key,
                    };
                    mutation.apply_to_slice(&mut self.values);
                    let placed = self.hole;
                    self.i += 1;
                    self.phase = Phase::Outer;
                    return Some(
                        Step::at_line(PLACE_KEY)
                            .highlight(&[placed])
                            .with_mutation(mutation),
                    );
                }
            }
        }
    }
}
