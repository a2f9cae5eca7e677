use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::SortError;
use crate::generators::{BubbleSteps, InsertionSteps, SelectionSteps, StepGenerator};

const BUBBLE_CODE: &[&str] = &[
    "for i = 0 to arrayLength-1",
    "    for j = 0 to arrayLength-i-1",
    "        if leftSide > rightSide",
    "            swap(leftSide, rightSide)",
];

const INSERTION_CODE: &[&str] = &[
    "for i = 1 to arrayLength",
    "    key = arr[i]",
    "    j = i - 1",
    "    while j >= 0 && arr[j] > key",
    "        shiftRight()",
    "        j = j - 1",
    "    arr[j+1] = key",
];

const SELECTION_CODE: &[&str] = &[
    "for i = 0 to arrayLength-1",
    "    minIndex = i",
    "    for j = i+1 to arrayLength",
    "        if arr[j] < arr[minIndex]",
    "            minIndex = j",
    "    swap(arr[minIndex], arr[i])",
];

#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    ValueEnum,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Bubble,
    Insertion,
    Selection,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Bubble, Algorithm::Insertion, Algorithm::Selection];

    pub fn title(&self) -> &'static str {
        match self {
            Algorithm::Bubble => "Bubble Sort",
            Algorithm::Insertion => "Insertion Sort",
            Algorithm::Selection => "Selection Sort",
        }
    }

    /// Ordered pseudocode lines; step line indices point into this list.
    pub fn pseudocode(&self) -> &'static [&'static str] {
        match self {
            Algorithm::Bubble => BUBBLE_CODE,
            Algorithm::Insertion => INSERTION_CODE,
            Algorithm::Selection => SELECTION_CODE,
        }
    }

    /// Build a fresh generator over a snapshot of `values`.
    pub fn steps(&self, values: &[i32]) -> StepGenerator {
        match self {
            Algorithm::Bubble => Box::new(BubbleSteps::new(values.to_vec())),
            Algorithm::Insertion => Box::new(InsertionSteps::new(values.to_vec())),
            Algorithm::Selection => Box::new(SelectionSteps::new(values.to_vec())),
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Algorithm::Bubble => Algorithm::Insertion,
            Algorithm::Insertion => Algorithm::Selection,
            Algorithm::Selection => Algorithm::Bubble,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Algorithm::Bubble => Algorithm::Selection,
            Algorithm::Insertion => Algorithm::Bubble,
            Algorithm::Selection => Algorithm::Insertion,
        }
    }
}

impl FromStr for Algorithm {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bubble" => Ok(Algorithm::Bubble),
            "insertion" => Ok(Algorithm::Insertion),
            "selection" => Ok(Algorithm::Selection),
            _ => Err(SortError::UnknownAlgorithm(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_names() {
        assert_eq!("bubble".parse::<Algorithm>(), Ok(Algorithm::Bubble));
        assert_eq!("Insertion".parse::<Algorithm>(), Ok(Algorithm::Insertion));
        assert_eq!(" selection ".parse::<Algorithm>(), Ok(Algorithm::Selection));
    }

    #[test]
    fn rejects_unknown_names() {
        assert_eq!(
            "merge".parse::<Algorithm>(),
            Err(SortError::UnknownAlgorithm("merge".to_string()))
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.to_string().parse::<Algorithm>(), Ok(algorithm));
        }
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Algorithm::Selection).unwrap();
        assert_eq!(json, "\"selection\"");
        let parsed: Algorithm = serde_json::from_str("\"insertion\"").unwrap();
        assert_eq!(parsed, Algorithm::Insertion);
    }

    #[test]
    fn cycling_visits_every_algorithm() {
        let mut seen = vec![Algorithm::Bubble];
        let mut current = Algorithm::Bubble.next();
        while current != Algorithm::Bubble {
            seen.push(current);
            current = current.next();
        }
        assert_eq!(seen, Algorithm::ALL.to_vec());
        assert_eq!(Algorithm::Bubble.prev().next(), Algorithm::Bubble);
    }

    #[test]
    fn pseudocode_line_counts() {
        assert_eq!(Algorithm::Bubble.pseudocode().len(), 4);
        assert_eq!(Algorithm::Insertion.pseudocode().len(), 7);
        assert_eq!(Algorithm::Selection.pseudocode().len(), 6);
    }

    #[test]
    fn every_step_line_exists_in_pseudocode() {
        let values = vec![9, 2, 7, 2, 5, 1, 8];
        for algorithm in Algorithm::ALL {
            let line_count = algorithm.pseudocode().len();
            for step in algorithm.steps(&values) {
                assert!(!step.lines.is_empty());
                assert!(step.lines.iter().all(|l| *l < line_count));
            }
        }
    }
}
