//! Per-team rollups over an aggregation snapshot.
//!
//! Everything here reads [`ScoredRecord`]s, so the totals already include
//! alliance bonuses and the EPA values are the per-match ones.

pub mod leaderboard;

pub use self::leaderboard::{leaderboard, LeaderboardEntry, LeaderboardMetric};
use crate::alliance::ScoredRecord;
use crate::consts::CORAL_LEVELS;
use serde::Serialize;
use std::collections::BTreeMap;

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Sample standard deviation (n - 1). Fewer than two samples gives 0.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / (values.len() - 1) as f64;
    var.sqrt()
}

fn ratio(num: u64, den: u64) -> Option<f64> {
    if den == 0 {
        None
    } else {
        Some(num as f64 / den as f64)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamAggregate {
    pub team_number: u32,
    pub matches_played: usize,

    // Per-match series
    pub total_scores: Vec<f64>,
    pub epas: Vec<f64>,

    pub mean_total: f64,
    pub std_total: f64,
    pub mean_epa: f64,
    pub mean_auto: f64,
    pub mean_teleop: f64,
    pub mean_endgame: f64,

    /// Share of matches ending in a shallow or deep climb.
    pub climb_rate: f64,
    pub taxi_rate: f64,
    /// Mean auto + teleop coral scored per match, L1 first.
    pub mean_coral_by_level: [f64; CORAL_LEVELS],

    pub coral_accuracy: Option<f64>,
    pub algae_accuracy: Option<f64>,
}

impl TeamAggregate {
    /// `records` must all belong to `team_number`.
    pub fn from_records<'a, I>(team_number: u32, records: I) -> Self
    where
        I: IntoIterator<Item = &'a ScoredRecord>,
    {
        let mut agg = Self {
            team_number,
            ..Default::default()
        };

        let mut autos = Vec::new();
        let mut teleops = Vec::new();
        let mut endgames = Vec::new();
        let mut climbs = 0usize;
        let mut taxis = 0usize;
        let mut coral_sums = [0u64; CORAL_LEVELS];
        let (mut coral_made, mut coral_tried) = (0u64, 0u64);
        let (mut algae_made, mut algae_tried) = (0u64, 0u64);

        for r in records {
            agg.total_scores.push(r.score.total_score as f64);
            agg.epas.push(r.epa);
            autos.push(r.score.auto_score as f64);
            teleops.push(r.score.teleop_score as f64);
            endgames.push(r.score.endgame_score as f64);

            let rec = &r.record;
            if rec.climb_status.is_climb() {
                climbs += 1;
            }
            if rec.auto_taxi_left {
                taxis += 1;
            }
            for (sum, count) in coral_sums.iter_mut().zip(rec.coral_by_level()) {
                *sum += u64::from(count);
            }
            for phase in [&rec.auto, &rec.teleop] {
                coral_made += u64::from(phase.coral_total());
                coral_tried += u64::from(phase.coral_attempts());
                algae_made += u64::from(phase.algae_scored());
                algae_tried += u64::from(phase.algae_attempts());
            }
        }

        let n = agg.total_scores.len();
        agg.matches_played = n;
        if n == 0 {
            return agg;
        }

        agg.mean_total = mean(&agg.total_scores);
        agg.std_total = std_dev(&agg.total_scores);
        agg.mean_epa = mean(&agg.epas);
        agg.mean_auto = mean(&autos);
        agg.mean_teleop = mean(&teleops);
        agg.mean_endgame = mean(&endgames);
        agg.climb_rate = climbs as f64 / n as f64;
        agg.taxi_rate = taxis as f64 / n as f64;
        for (avg, sum) in agg.mean_coral_by_level.iter_mut().zip(coral_sums) {
            *avg = sum as f64 / n as f64;
        }
        agg.coral_accuracy = ratio(coral_made, coral_tried);
        agg.algae_accuracy = ratio(algae_made, algae_tried);

        agg
    }
}

pub fn build_team_aggregates(records: &[ScoredRecord]) -> BTreeMap<u32, TeamAggregate> {
    let mut by_team: BTreeMap<u32, Vec<&ScoredRecord>> = BTreeMap::new();
    for r in records {
        by_team.entry(r.record.team_number).or_default().push(r);
    }

    by_team
        .into_iter()
        .map(|(team, recs)| (team, TeamAggregate::from_records(team, recs)))
        .collect()
}
