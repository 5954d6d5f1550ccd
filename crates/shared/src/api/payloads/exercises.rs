use serde::{Deserialize, Serialize};

use crate::{
    api::error::ValidationError,
    model::{DurationInput, ExerciseDate},
    types::Uuid,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExerciseRequest {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub duration: Option<DurationInput>,
    /// `YEAR-MONTH-DAY`, today when absent
    #[serde(default)]
    pub date: Option<String>,
}

impl NewExerciseRequest {
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    pub fn minutes(&self) -> Option<u32> {
        self.duration.as_ref().and_then(DurationInput::minutes)
    }

    /// The description and duration in minutes, or every reason they can't
    /// be used
    pub fn validated(&self) -> Result<(&str, u32), ValidationError> {
        let mut err = ValidationError::default();

        let description = self.description();
        if description.is_empty() {
            err.push("description is required");
        }

        let minutes = self.minutes();
        if minutes.is_none() {
            err.push("duration must be a positive whole number of minutes");
        }

        match minutes {
            Some(minutes) if err.is_empty() => Ok((description, minutes)),
            _ => Err(err),
        }
    }
}

/// The created exercise along with the user it was logged for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseAdded {
    pub username: String,
    pub description: String,
    pub duration: u32,
    pub date: ExerciseDate,
    pub id: Uuid,
}
