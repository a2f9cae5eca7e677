use crate::step::{Mutation, Step};

const MIN_INIT: &[usize] = &[0, 1];
const INNER_LOOP: usize = 2;
const COMPARE: usize = 3;
const UPDATE_MIN: usize = 4;
const SWAP: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Outer,
    Inner,
    Compare,
    UpdateMin,
    Swap,
    Done,
}

#[derive(Debug)]
pub struct SelectionSteps {
    values: Vec<i32>,
    i: usize,
    j: usize,
    min_index: usize,
    phase: Phase,
}

impl SelectionSteps {
    pub fn new(values: Vec<i32>) -> Self {
        Self {
            values,
            i: 0,
            j: 0,
            min_index: 0,
            phase: Phase::Outer,
        }
    }
}

impl Iterator for SelectionSteps {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let n = self.values.len();
        loop {
            match self.phase {
                Phase::Done => return None,
                Phase::Outer => {
                    if self.i + 1 >= n {
                        self.phase = Phase::Done;
                        continue;
                    }
                    self.min_index = self.i;
                    self.j = self.i + 1;
                    self.phase = Phase::Inner;
                    return Some(Step::at_lines(MIN_INIT).highlight(&[self.i]));
                }
                Phase::Inner => {
                    if self.j >= n {
                        self.phase = Phase::Swap;
                        continue;
                    }
                    self.phase = Phase::Compare;
                    return Some(Step::at_line(INNER_LOOP).highlight(&[self.i]));
                }
                Phase::Compare => {
                    let (j, min_index) = (self.j, self.min_index);
                    if self.values[j] < self.values[min_index] {
                        self.phase = Phase::UpdateMin;
                    } else {
                        self.j += 1;
                        self.phase = Phase::Inner;
                    }
                    return Some(Step::at_line(COMPARE).highlight(&[j, min_index]));
                }
                Phase::UpdateMin => {
                    self.min_index = self.j;
                    self.j += 1;
                    self.phase = Phase::Inner;
                    return Some(Step::at_line(UPDATE_MIN).highlight(&[self.min_index]));
                }
                Phase::Swap => {
                    let i = self.i;
                    let mutation = Mutation::Swap(i, self.min_index);
                    mutation.apply_to_slice(&mut self.values);
                    let step = Step::at_line(SWAP)
                        .highlight(&[i, self.min_index])
                        .with_mutation(mutation);
                    self.i += 1;
                    self.phase = Phase::Outer;
                    return Some(step);
                }
            }
        }
    }
}
