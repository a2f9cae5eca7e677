use crate::step::{Mutation, Step};

const OUTER_LOOP: usize = 0;
const INNER_LOOP: usize = 1;
const COMPARE: usize = 2;
const SWAP: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Outer,
    Inner,
    Compare,
    Swap,
    Done,
}

/// Bubble sort: both loops run over `0..=n-2`, one comparison per inner pass.
#[derive(Debug)]
pub struct BubbleSteps {
    values: Vec<i32>,
    pass: usize,
    i: usize,
    phase: Phase,
}

impl BubbleSteps {
    pub fn new(values: Vec<i32>) -> Self {
        let phase = if values.len() < 2 {
            Phase::Done
        } else {
            Phase::Outer
        };
        Self {
            values,
            pass: 0,
            i: 0,
            phase,
        }
    }

    fn last_index(&self) -> usize {
        self.values.len() - 2
    }
}

impl Iterator for BubbleSteps {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        loop {
            match self.phase {
                Phase::Done => return None,
                Phase::Outer => {
                    if self.pass > self.last_index() {
                        self.phase = Phase::Done;
                        continue;
                    }
                    self.i = 0;
                    self.phase = Phase::Inner;
                    return Some(Step::at_line(OUTER_LOOP));
                }
                Phase::Inner => {
                    if self.i > self.last_index() {
                        self.pass += 1;
                        self.phase = Phase::Outer;
                        continue;
                    }
                    self.phase = Phase::Compare;
                    return Some(Step::at_line(INNER_LOOP));
                }
                Phase::Compare => {
                    let i = self.i;
                    if self.values[i] > self.values[i + 1] {
                        self.phase = Phase::Swap;
                    } else {
                        self.i += 1;
                        self.phase = Phase::Inner;
                    }
                    return Some(Step::at_line(COMPARE).highlight(&[i, i + 1]));
                }
                Phase::Swap => {
                    let i = self.i;
                    let mutation = Mutation::Swap(i, i + 1);
                    mutation.apply_to_slice(&mut self.values);
                    self.i += 1;
                    self.phase = Phase::Inner;
                    return Some(
                        Step::at_line(SWAP)
                            .highlight(&[i, i + 1])
                            .with_mutation(mutation),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::ArrayModel;

    #[test]
    fn first_steps_on_concrete_array() {
        let mut model = ArrayModel::from_values(vec![5, 3, 4, 1, 2]);
        let mut steps = BubbleSteps::new(model.values().to_vec());

        let outer = steps.next().unwrap();
        assert_eq!(outer, Step::at_line(OUTER_LOOP));

        let inner = steps.next().unwrap();
        assert_eq!(inner, Step::at_line(INNER_LOOP));

        let compare = steps.next().unwrap();
        assert_eq!(compare.lines, Step::at_line(COMPARE).lines);
        assert_eq!(compare.highlighted.iter().copied().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(compare.mutation, None);

        let swap = steps.next().unwrap();
        assert_eq!(swap.lines, Step::at_line(SWAP).lines);
        assert_eq!(swap.mutation, Some(Mutation::Swap(0, 1)));
        swap.mutation.unwrap().apply(&mut model).unwrap();
        assert_eq!(model.values(), &[3, 5, 4, 1, 2]);

        for step in steps {
            if let Some(mutation) = step.mutation {
                mutation.apply(&mut model).unwrap();
            }
        }
        assert_eq!(model.values(), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn two_elements_in_order() {
        let lines: Vec<usize> = BubbleSteps::new(vec![1, 2])
            .map(|s| *s.lines.iter().next().unwrap())
            .collect();
        assert_eq!(lines, vec![OUTER_LOOP, INNER_LOOP, COMPARE]);
    }

    #[test]
    fn two_elements_out_of_order() {
        let steps: Vec<Step> = BubbleSteps::new(vec![2, 1]).collect();
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[3].mutation, Some(Mutation::Swap(0, 1)));
    }
}
