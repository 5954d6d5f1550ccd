use serde::{Deserialize, Serialize};

use crate::{
    api::{
        error::ValidationError,
        payloads::{NewUserRequest, UserSummary},
    },
    model::{ExerciseRecord, ValidateModel},
    types::Uuid,
};

/// A user together with their full exercise log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: Uuid,
    pub username: String,
    pub log: Vec<ExerciseRecord>,
}

impl UserAccount {
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            username: self.username.clone(),
            id: self.id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub id: Uuid,
    pub username: String,
}

impl NewUser {
    pub fn new<I: Into<Uuid>, T: Into<String>>(id: I, username: T) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
        }
    }
}

impl ValidateModel for NewUser {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.username.is_empty() {
            Err(ValidationError::new("username is required"))
        } else {
            Ok(())
        }
    }
}

impl From<NewUserRequest> for NewUser {
    fn from(request: NewUserRequest) -> Self {
        NewUser::new(Uuid::new_v4(), request.username)
    }
}
