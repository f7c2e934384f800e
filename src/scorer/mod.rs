pub mod engine;
pub mod types;

pub use self::types::ScoreBreakdown;
use crate::error::ScoutResult;
use crate::model::{MatchRecord, RawMatchRecord};

/// Validates a raw submission and scores it.
///
/// Fails with `MissingField` when any counter or flag is absent and with
/// `InvalidValue` for negative counters or unknown enum text. Alliance
/// bonuses are not included; see [`crate::alliance::aggregate`].
pub fn compute_score(raw: &RawMatchRecord) -> ScoutResult<ScoreBreakdown> {
    let record = MatchRecord::try_from(raw)?;
    Ok(score_record(&record))
}

/// Scores an already validated record. Missed attempts never cost points.
pub fn score_record(record: &MatchRecord) -> ScoreBreakdown {
    ScoreBreakdown::new(
        engine::auto_points(record),
        engine::teleop_points(record),
        engine::endgame_points(record.climb_status),
    )
}
