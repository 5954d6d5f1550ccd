//! Calendar dates attached to exercises.
//!
//! Dates are submitted as `YEAR-MONTH-DAY` and stored in the human readable
//! form `Mon Jan 01 2024`. Unparseable dates only exist when the normalizer
//! runs in [`DateParsing::Lenient`] mode, where they are kept as the
//! `Invalid Date` sentinel instead of being rejected.

use std::{fmt, str::FromStr};

use chrono::{Days, Local, NaiveDate};
use serde_with::{DeserializeFromStr, SerializeDisplay};
#[cfg(feature = "backend")]
use rusqlite::{
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
    ToSql,
};

use crate::api::error::ValidationError;

pub const INVALID_DATE: &str = "Invalid Date";
const DISPLAY_FORMAT: &str = "%a %b %d %Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
pub enum ExerciseDate {
    Valid(NaiveDate),
    Invalid,
}

impl ExerciseDate {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            ExerciseDate::Valid(date) => Some(*date),
            ExerciseDate::Invalid => None,
        }
    }
}

impl From<NaiveDate> for ExerciseDate {
    fn from(date: NaiveDate) -> Self {
        ExerciseDate::Valid(date)
    }
}

impl fmt::Display for ExerciseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExerciseDate::Valid(date) => write!(f, "{}", date.format(DISPLAY_FORMAT)),
            ExerciseDate::Invalid => f.write_str(INVALID_DATE),
        }
    }
}

impl FromStr for ExerciseDate {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == INVALID_DATE {
            return Ok(ExerciseDate::Invalid);
        }
        NaiveDate::parse_from_str(s, DISPLAY_FORMAT).map(ExerciseDate::Valid)
    }
}

#[cfg(feature = "backend")]
impl ToSql for ExerciseDate {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::Owned(self.to_string().into()))
    }
}

#[cfg(feature = "backend")]
impl FromSql for ExerciseDate {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        ExerciseDate::from_str(value.as_str()?).map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

/// How submitted dates that don't describe a real calendar day are handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "backend", derive(clap::ValueEnum))]
pub enum DateParsing {
    /// Reject anything but `YEAR-MONTH-DAY` naming a real day
    #[default]
    Strict,
    /// Roll out of range months and days over and store `Invalid Date` for
    /// input that isn't numeric
    Lenient,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DateNormalizer {
    parsing: DateParsing,
}

impl DateNormalizer {
    pub fn new(parsing: DateParsing) -> Self {
        Self { parsing }
    }

    /// Normalizes against the local clock's current date
    pub fn normalize(&self, input: Option<&str>) -> Result<ExerciseDate, ValidationError> {
        self.normalize_on(input, Local::now().date_naive())
    }

    pub fn normalize_on(
        &self,
        input: Option<&str>,
        today: NaiveDate,
    ) -> Result<ExerciseDate, ValidationError> {
        let Some(input) = input.filter(|s| !s.is_empty()) else {
            return Ok(ExerciseDate::Valid(today));
        };

        match self.parsing {
            DateParsing::Strict => parse_strict(input).map(ExerciseDate::Valid).ok_or_else(|| {
                ValidationError::new(format!("date '{input}' is not a valid YYYY-MM-DD date"))
            }),
            DateParsing::Lenient => Ok(parse_lenient(input)),
        }
    }
}

/// Parses `YEAR-MONTH-DAY` where every segment is made of decimal digits and
/// the result is a real calendar day. Zero padding is optional
pub fn parse_strict(input: &str) -> Option<NaiveDate> {
    let mut segments = input.split('-');
    let (year, month, day) = (segments.next()?, segments.next()?, segments.next()?);
    if segments.next().is_some() {
        return None;
    }

    let is_number = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !(is_number(year) && is_number(month) && is_number(day)) {
        return None;
    }

    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

fn parse_lenient(input: &str) -> ExerciseDate {
    let mut segments = input.split('-').map(coerce_number);
    let (Some(year), Some(month), Some(day)) = (segments.next(), segments.next(), segments.next())
    else {
        return ExerciseDate::Invalid;
    };

    from_components(year, month - 1.0, day)
        .map(ExerciseDate::Valid)
        .unwrap_or(ExerciseDate::Invalid)
}

/// Builds a date from a zero-based month, rolling overflowing months into
/// years and overflowing days into months. Years 0 to 99 are 1900 to 1999
fn from_components(year: f64, month_index: f64, day: f64) -> Option<NaiveDate> {
    if !(year.is_finite() && month_index.is_finite() && day.is_finite()) {
        return None;
    }

    let mut year = year.trunc() as i64;
    if (0..=99).contains(&year) {
        year += 1900;
    }

    let months = year.checked_mul(12)?.checked_add(month_index.trunc() as i64)?;
    let first_of_month = NaiveDate::from_ymd_opt(
        i32::try_from(months.div_euclid(12)).ok()?,
        (months.rem_euclid(12) + 1) as u32,
        1,
    )?;

    let offset = (day.trunc() as i64).checked_sub(1)?;
    if offset >= 0 {
        first_of_month.checked_add_days(Days::new(offset as u64))
    } else {
        first_of_month.checked_sub_days(Days::new(offset.unsigned_abs()))
    }
}

/// Numeric coercion of submitted text: surrounding whitespace is ignored, an
/// empty string is zero and anything that isn't a number is NaN
pub fn coerce_number(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        0.0
    } else {
        s.parse().unwrap_or(f64::NAN)
    }
}
