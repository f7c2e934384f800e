use super::TeamAggregate;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardMetric {
    TotalScore,
    Epa,
    AutoScore,
    TeleopScore,
    EndgameScore,
    CoralAccuracy,
    AlgaeAccuracy,
    ClimbRate,
}

impl LeaderboardMetric {
    pub fn value(self, agg: &TeamAggregate) -> Option<f64> {
        if agg.matches_played == 0 {
            return None;
        }
        match self {
            Self::TotalScore => Some(agg.mean_total),
            Self::Epa => Some(agg.mean_epa),
            Self::AutoScore => Some(agg.mean_auto),
            Self::TeleopScore => Some(agg.mean_teleop),
            Self::EndgameScore => Some(agg.mean_endgame),
            Self::CoralAccuracy => agg.coral_accuracy,
            Self::AlgaeAccuracy => agg.algae_accuracy,
            Self::ClimbRate => Some(agg.climb_rate),
        }
    }

    pub fn is_ratio(self) -> bool {
        matches!(
            self,
            Self::CoralAccuracy | Self::AlgaeAccuracy | Self::ClimbRate
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub team_number: u32,
    pub value: Option<f64>,
    pub matches_played: usize,
}

/// Ranks teams by `metric`, best first. Ties go to the lower team number;
/// teams without a value for the metric come last.
pub fn leaderboard(
    aggregates: &BTreeMap<u32, TeamAggregate>,
    metric: LeaderboardMetric,
) -> Vec<LeaderboardEntry> {
    let mut rows: Vec<(u32, Option<f64>, usize)> = aggregates
        .values()
        .map(|a| (a.team_number, metric.value(a), a.matches_played))
        .collect();

    rows.sort_by(|a, b| {
        let by_value = match (a.1, b.1) {
            (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_value.then(a.0.cmp(&b.0))
    });

    rows.into_iter()
        .enumerate()
        .map(|(i, (team_number, value, matches_played))| LeaderboardEntry {
            rank: i + 1,
            team_number,
            value,
            matches_played,
        })
        .collect()
}
