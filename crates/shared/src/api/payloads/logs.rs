use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};

use crate::{model::ExerciseRecord, types::Uuid};

/// Query string of the log endpoint. Empty values are treated as absent
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogQuery {
    #[serde(default)]
    #[serde_as(as = "NoneAsEmptyString")]
    pub from: Option<String>,
    #[serde(default)]
    #[serde_as(as = "NoneAsEmptyString")]
    pub to: Option<String>,
    #[serde(default)]
    #[serde_as(as = "NoneAsEmptyString")]
    pub limit: Option<usize>,
}

impl LogQuery {
    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none() && self.limit.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserLog {
    pub username: String,
    pub id: Uuid,
    pub count: usize,
    pub log: Vec<ExerciseRecord>,
}
