//! Range and limit filtering of a user's exercise log.
//!
//! `from` and `to` are inclusive. How records and bounds are compared is set
//! by [`DateKey`], and how `limit` interacts with the range by [`LimitMode`].
//! Keys are `f64` so that anything unparseable becomes NaN, which fails every
//! comparison and so never matches a bound.

use chrono::{Datelike, NaiveDate};

use super::{coerce_number, parse_strict, ExerciseDate, ExerciseRecord};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "backend", derive(clap::ValueEnum))]
pub enum DateKey {
    /// Compare as calendar days
    #[default]
    Calendar,
    /// Compare the number formed by writing year, month and day one after
    /// another without zero padding, so `Jan 05 2024` is `202415`. Bounds
    /// have their hyphens removed. Kept for compatibility with older clients,
    /// it does not order dates correctly
    Concatenated,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "backend", derive(clap::ValueEnum))]
pub enum LimitMode {
    /// `limit` takes the head of the unfiltered log, discarding the range
    #[default]
    Replace,
    /// `limit` takes the head of the range filtered log
    Compose,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LogFilter {
    pub date_key: DateKey,
    pub limit_mode: LimitMode,
}

impl LogFilter {
    pub fn new(date_key: DateKey, limit_mode: LimitMode) -> Self {
        Self {
            date_key,
            limit_mode,
        }
    }

    /// Empty bounds and a zero limit count as not supplied. Relative order of
    /// the log is always kept
    pub fn filter(
        &self,
        log: &[ExerciseRecord],
        from: Option<&str>,
        to: Option<&str>,
        limit: Option<usize>,
    ) -> Vec<ExerciseRecord> {
        let from = from.filter(|s| !s.is_empty());
        let to = to.filter(|s| !s.is_empty());
        let limit = limit.filter(|l| *l > 0);

        let mut filtered = log.to_vec();

        if from.is_some() || to.is_some() {
            let from = from.map(|s| self.bound_key(s));
            let to = to.map(|s| self.bound_key(s));
            filtered.retain(|record| in_range(self.record_key(&record.date), from, to));
        }

        if let Some(limit) = limit {
            match self.limit_mode {
                LimitMode::Replace => filtered = log.iter().take(limit).cloned().collect(),
                LimitMode::Compose => filtered.truncate(limit),
            }
        }

        filtered
    }

    fn record_key(&self, date: &ExerciseDate) -> f64 {
        let Some(date) = date.date() else {
            return f64::NAN;
        };

        match self.date_key {
            DateKey::Calendar => calendar_key(date),
            DateKey::Concatenated => {
                coerce_number(&format!("{}{}{}", date.year(), date.month(), date.day()))
            },
        }
    }

    fn bound_key(&self, bound: &str) -> f64 {
        match self.date_key {
            DateKey::Calendar => parse_strict(bound).map(calendar_key).unwrap_or(f64::NAN),
            DateKey::Concatenated => coerce_number(&bound.replace('-', "")),
        }
    }
}

fn calendar_key(date: NaiveDate) -> f64 {
    date.num_days_from_ce().into()
}

fn in_range(key: f64, from: Option<f64>, to: Option<f64>) -> bool {
    match (from, to) {
        (Some(from), Some(to)) => key >= from && key <= to,
        (Some(from), None) => key >= from,
        (None, Some(to)) => key <= to,
        (None, None) => true,
    }
}
