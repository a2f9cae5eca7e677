use rand::Rng;

use crate::error::{Result, SortError};

/// The sequence of bar heights being sorted.
///
/// Only generators change it during a run (through [`crate::step::Mutation`]),
/// and only at a step boundary; renderers just read it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrayModel {
    values: Vec<i32>,
}

impl ArrayModel {
    pub fn from_values(values: Vec<i32>) -> Self {
        Self { values }
    }

    /// Replace the contents with `count` values drawn uniformly from
    /// `min_value..=max_value`.
    pub fn reset(&mut self, count: usize, min_value: i32, max_value: i32) -> Result<()> {
        self.reset_with(&mut rand::thread_rng(), count, min_value, max_value)
    }

    /// Same as [`ArrayModel::reset`] with a caller supplied generator.
    /// On error the current values are left untouched.
    pub fn reset_with<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        count: usize,
        min_value: i32,
        max_value: i32,
    ) -> Result<()> {
        if count == 0 {
            return Err(SortError::InvalidConfiguration(
                "bar count must be greater than zero".to_string(),
            ));
        }
        if min_value > max_value {
            return Err(SortError::InvalidConfiguration(format!(
                "min height {} is greater than max height {}",
                min_value, max_value
            )));
        }

        self.values = (0..count)
            .map(|_| rng.gen_range(min_value..=max_value))
            .collect();
        Ok(())
    }

    pub fn read(&self, index: usize) -> Result<i32> {
        self.values
            .get(index)
            .copied()
            .ok_or_else(|| self.out_of_range(index))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[i32] {
        &self.values
    }

    pub fn swap(&mut self, i: usize, j: usize) -> Result<()> {
        self.check(i)?;
        self.check(j)?;
        self.values.swap(i, j);
        Ok(())
    }

    pub fn set(&mut self, index: usize, value: i32) -> Result<()> {
        self.check(index)?;
        self.values[index] = value;
        Ok(())
    }

    fn check(&self, index: usize) -> Result<()> {
        if index < self.values.len() {
            Ok(())
        } else {
            Err(self.out_of_range(index))
        }
    }

    fn out_of_range(&self, index: usize) -> SortError {
        SortError::IndexOutOfRange {
            index,
            len: self.values.len(),
        }
    }
}
