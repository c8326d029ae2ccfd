//! Input validation for session records.
//!
//! Checked once at save time, before a record is stamped and stored. Counters
//! are unsigned and need no check here.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::entities::SessionInput;

/// Inclusive bounds of `integrityScore`.
pub const INTEGRITY_SCORE_RANGE: std::ops::RangeInclusive<f64> = 0.0..=100.0;

/// A session payload that must not be stored.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("endTime {end} is before startTime {start}")]
    EndBeforeStart {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("integrityScore {0} is outside 0..=100")]
    IntegrityScoreOutOfRange(f64),

    #[error("integrityScore is not a finite number")]
    IntegrityScoreNotFinite,
}

impl SessionInput {
    /// Check the invariants a stored record must satisfy.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.start_time > self.end_time {
            return Err(ValidationError::EndBeforeStart {
                start: self.start_time,
                end: self.end_time,
            });
        }
        if !self.integrity_score.is_finite() {
            return Err(ValidationError::IntegrityScoreNotFinite);
        }
        if !INTEGRITY_SCORE_RANGE.contains(&self.integrity_score) {
            return Err(ValidationError::IntegrityScoreOutOfRange(
                self.integrity_score,
            ));
        }
        Ok(())
    }
}
