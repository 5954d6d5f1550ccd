mod user;
pub use user::*;

mod exercise;
pub use exercise::*;

use crate::api::error::ValidationError;

pub trait ValidateModel {
    fn validate(&self) -> Result<(), ValidationError>;
}
