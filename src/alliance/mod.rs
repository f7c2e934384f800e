pub mod bonus;

use self::bonus::GroupTally;
use crate::config::BonusRules;
use crate::consts::CORAL_LEVELS;
use crate::error::ScoutWarning;
use crate::model::{AllianceColor, MatchKey, MatchRecord, RawMatchNumber, RawMatchRecord};
use crate::scorer::{score_record, ScoreBreakdown};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct AllianceKey {
    pub match_number: MatchKey,
    pub alliance: AllianceColor,
}

impl AllianceKey {
    pub fn of(record: &MatchRecord) -> Self {
        Self {
            match_number: record.match_number.clone(),
            alliance: record.alliance_color,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllianceBonus {
    #[serde(flatten)]
    pub key: AllianceKey,
    pub coop_bonus: u32,
    pub harmony_bonus: u32,
    pub coral_by_level: [u32; CORAL_LEVELS],
    pub team_count: usize,
    pub climb_count: usize,
}

impl AllianceBonus {
    pub fn total(&self) -> u32 {
        self.coop_bonus.saturating_add(self.harmony_bonus)
    }
}

/// A validated record with its final score and alliance-relative metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRecord {
    #[serde(flatten)]
    pub record: MatchRecord,
    #[serde(flatten)]
    pub score: ScoreBreakdown,
    /// Phase total before alliance bonuses.
    pub raw_total: u32,
    pub coop_bonus: u32,
    pub harmony_bonus: u32,
    pub epa: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedRecord {
    /// Position in the input slice.
    pub index: usize,
    pub team_number: Option<i64>,
    pub match_number: Option<String>,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregationReport {
    pub records: Vec<ScoredRecord>,
    /// Sorted by key.
    pub bonuses: Vec<AllianceBonus>,
    pub rejected: Vec<RejectedRecord>,
    pub warnings: Vec<ScoutWarning>,
}

impl AggregationReport {
    pub fn bonus_for(&self, key: &AllianceKey) -> Option<&AllianceBonus> {
        self.bonuses
            .binary_search_by(|b| b.key.cmp(key))
            .ok()
            .map(|i| &self.bonuses[i])
    }

    pub fn records_for<'a>(&'a self, key: &'a AllianceKey) -> impl Iterator<Item = &'a ScoredRecord> {
        self.records
            .iter()
            .filter(move |r| r.record.match_number == key.match_number && r.record.alliance_color == key.alliance)
    }
}

/// Scores every record, applies alliance bonuses and computes EPA.
///
/// Records that fail validation are reported in `rejected` and take no part in
/// any group. The result depends only on the input, so re-running on the same
/// snapshot yields an identical report.
pub fn aggregate(raw_records: &[RawMatchRecord], rules: &BonusRules) -> AggregationReport {
    let mut rejected = Vec::new();
    let mut valid: Vec<(usize, MatchRecord)> = Vec::with_capacity(raw_records.len());

    for (index, raw) in raw_records.iter().enumerate() {
        match MatchRecord::try_from(raw) {
            Ok(record) => valid.push((index, record)),
            Err(e) => {
                warn!(
                    "Skipping record #{} (team {:?}, match {:?}): {}",
                    index, raw.team_number, raw.match_number, e
                );
                rejected.push(RejectedRecord {
                    index,
                    team_number: raw.team_number,
                    match_number: raw.match_number.as_ref().map(|m| match m {
                        RawMatchNumber::Number(n) => n.to_string(),
                        RawMatchNumber::Text(s) => s.clone(),
                    }),
                    error: e.to_string(),
                });
            }
        }
    }

    let mut report = aggregate_records(valid, rules);
    report.rejected = rejected;
    report
}

/// Aggregation over records that are already validated, tagged with their
/// original input position for stable ordering.
pub fn aggregate_records(
    mut valid: Vec<(usize, MatchRecord)>,
    rules: &BonusRules,
) -> AggregationReport {
    valid.sort_by(|(ia, a), (ib, b)| {
        AllianceKey::of(a)
            .cmp(&AllianceKey::of(b))
            .then(a.team_number.cmp(&b.team_number))
            .then(ia.cmp(ib))
    });

    let mut groups: BTreeMap<AllianceKey, Vec<MatchRecord>> = BTreeMap::new();
    for (_, record) in valid {
        groups.entry(AllianceKey::of(&record)).or_default().push(record);
    }

    let mut report = AggregationReport::default();

    for (key, members) in groups {
        let tally = GroupTally::from_records(&members);
        let bonus = AllianceBonus {
            key: key.clone(),
            coop_bonus: bonus::coop_bonus(&tally.coral_by_level, rules),
            harmony_bonus: bonus::harmony_bonus(tally.team_count, tally.climb_count, rules),
            coral_by_level: tally.coral_by_level,
            team_count: tally.team_count,
            climb_count: tally.climb_count,
        };

        if members.len() < 2 {
            warn!(
                "Degenerate group: match {} {} has {} record(s)",
                key.match_number,
                key.alliance,
                members.len()
            );
            report.warnings.push(ScoutWarning::DegenerateGroup {
                match_number: key.match_number.to_string(),
                alliance: key.alliance,
                members: members.len(),
            });
        }

        let scores: Vec<ScoreBreakdown> = members
            .iter()
            .map(|r| score_record(r).with_bonus(bonus.total()))
            .collect();
        let mean = scores.iter().map(|s| s.total_score as f64).sum::<f64>() / scores.len() as f64;

        for (record, score) in members.into_iter().zip(scores) {
            report.records.push(ScoredRecord {
                raw_total: score.phase_total(),
                coop_bonus: bonus.coop_bonus,
                harmony_bonus: bonus.harmony_bonus,
                epa: score.total_score as f64 - mean,
                score,
                record,
            });
        }

        report.bonuses.push(bonus);
    }

    debug!(
        "Aggregated {} records into {} alliance groups",
        report.records.len(),
        report.bonuses.len()
    );

    report
}
