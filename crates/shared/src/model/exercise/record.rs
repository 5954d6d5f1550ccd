use serde::{Deserialize, Serialize};

use super::{coerce_number, ExerciseDate};

/// One logged exercise. Never changed once appended to a log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    pub description: String,
    /// Minutes
    pub duration: u32,
    pub date: ExerciseDate,
}

impl ExerciseRecord {
    pub fn new<S: Into<String>>(description: S, duration: u32, date: ExerciseDate) -> Self {
        Self {
            description: description.into(),
            duration,
            date,
        }
    }
}

/// A duration as submitted. JSON clients send numbers, forms send text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DurationInput {
    Number(f64),
    Text(String),
}

impl DurationInput {
    pub fn coerce(&self) -> f64 {
        match self {
            DurationInput::Number(n) => *n,
            DurationInput::Text(s) => coerce_number(s),
        }
    }

    /// The coerced duration when it is a positive whole number of minutes
    pub fn minutes(&self) -> Option<u32> {
        let value = self.coerce();
        if value > 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64 {
            Some(value as u32)
        } else {
            None
        }
    }
}

impl From<u32> for DurationInput {
    fn from(value: u32) -> Self {
        DurationInput::Number(value.into())
    }
}

impl From<&str> for DurationInput {
    fn from(value: &str) -> Self {
        DurationInput::Text(value.to_owned())
    }
}
