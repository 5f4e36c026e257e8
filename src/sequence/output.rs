// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Serializable form of an example.
//!
//! Plain steps are bare signed numbers; composite steps are records:
//!
//! ```json
//! {"start":0,"steps":[7,{"value":-4,"family":"brother","trained_digit":4,
//!   "formula":[{"offset":0,"delta":-5},{"offset":0,"delta":1}]}],"answer":3,
//!   "best_effort":false}
//! ```

use super::{ActionTag, Step};
use crate::memo::Formula;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepOutput {
    Plain(i64),
    Composite {
        value: i64,
        family: ActionTag,
        trained_digit: u8,
        formula: Formula,
    },
}

impl From<&Step> for StepOutput {
    fn from(step: &Step) -> Self {
        match step.action.composite_part() {
            None => StepOutput::Plain(step.action.value()),
            Some(composite) => StepOutput::Composite {
                value: step.action.value(),
                family: composite.tag,
                trained_digit: composite.trained_digit,
                formula: composite.formula.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleOutput {
    pub start: u64,
    pub steps: Vec<StepOutput>,
    pub answer: u64,
    pub best_effort: bool,
}

impl ExampleOutput {
    pub fn values(&self) -> Vec<i64> {
        self.steps
            .iter()
            .map(|step| match step {
                StepOutput::Plain(value) => *value,
                StepOutput::Composite { value, .. } => *value,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beads::Sign;
    use crate::config::RuleFamily;
    use crate::memo::formulas;

    #[test]
    fn test_output_json_shape() {
        let output = ExampleOutput {
            start: 0,
            steps: vec![
                StepOutput::Plain(7),
                StepOutput::Composite {
                    value: -4,
                    family: ActionTag::Brother,
                    trained_digit: 4,
                    formula: formulas::build(RuleFamily::Brothers, 4, Sign::Minus).unwrap(),
                },
            ],
            answer: 3,
            best_effort: false,
        };
        let json = serde_json::to_string(&output).unwrap();
        assert_eq!(
            json,
            r#"{"start":0,"steps":[7,{"value":-4,"family":"brother","trained_digit":4,"formula":[{"offset":0,"delta":-5},{"offset":0,"delta":1}]}],"answer":3,"best_effort":false}"#
        );
        let parsed: ExampleOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.values(), vec![7, -4]);
    }
}
