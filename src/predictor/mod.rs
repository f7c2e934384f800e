pub mod types;

pub use self::types::{
    AllianceProjection, ComparisonMetric, MatchupProjection, MetricComparison, TeamContribution,
};
use crate::config::{BonusRules, EngineConfig};
use crate::consts::{CORAL_LEVELS, MAX_ALLIANCE_SIZE};
use crate::error::{ScoutError, ScoutResult, ScoutWarning};
use crate::model::AllianceColor;
use crate::stats::TeamAggregate;
use std::collections::{BTreeMap, BTreeSet};
use strum::IntoEnumIterator;
use tracing::{debug, warn};
use typed_builder::TypedBuilder;

/// Per-team history keyed by team number.
pub type HistoryIndex = BTreeMap<u32, TeamAggregate>;

/// A proposed matchup, built the same way the CLI and session build it.
#[derive(Debug, Clone, TypedBuilder)]
pub struct PredictionRequest {
    #[builder(default)]
    pub red: Vec<u32>,
    #[builder(default)]
    pub blue: Vec<u32>,
    #[builder(default)]
    pub config: EngineConfig,
}

impl PredictionRequest {
    pub fn run(&self, history: &HistoryIndex) -> ScoutResult<MatchupProjection> {
        predict(&self.red, &self.blue, history, &self.config)
    }
}

/// `P(red wins)` in percent for a projected score difference.
pub fn win_probability(red_score: f64, blue_score: f64, sensitivity: f64) -> f64 {
    100.0 / (1.0 + (-sensitivity * (red_score - blue_score)).exp())
}

/// Chance that every listed team climbs, assuming independence.
pub fn harmony_probability(climb_rates: &[f64]) -> f64 {
    if climb_rates.is_empty() {
        return 0.0;
    }
    climb_rates.iter().product::<f64>().clamp(0.0, 1.0)
}

/// Each level earns partial credit up to its threshold; enough full levels
/// saturate at 1.0.
pub fn coop_probability(combined_coral: &[f64; CORAL_LEVELS], rules: &BonusRules) -> f64 {
    let credit: f64 = combined_coral
        .iter()
        .map(|&c| {
            if rules.coop_level_threshold == 0 {
                1.0
            } else {
                (c / rules.coop_level_threshold as f64).min(1.0)
            }
        })
        .sum();
    (credit / rules.coop_levels_required as f64).clamp(0.0, 1.0)
}

pub fn predict(
    red: &[u32],
    blue: &[u32],
    history: &HistoryIndex,
    config: &EngineConfig,
) -> ScoutResult<MatchupProjection> {
    let mut warnings = Vec::new();

    let mut red_proj = project_alliance(AllianceColor::Red, red, history, config, &mut warnings)?;
    let mut blue_proj =
        project_alliance(AllianceColor::Blue, blue, history, config, &mut warnings)?;

    let p_red = win_probability(
        red_proj.projected_score,
        blue_proj.projected_score,
        config.prediction.win_sensitivity,
    );
    red_proj.win_probability = p_red;
    blue_proj.win_probability = 100.0 - p_red;

    debug!(
        "Prediction {:?} vs {:?}: {:.1} - {:.1} (red {:.1}%)",
        red, blue, red_proj.projected_score, blue_proj.projected_score, p_red
    );

    let comparison = compare(red, blue, history);

    Ok(MatchupProjection {
        red: red_proj,
        blue: blue_proj,
        comparison,
        warnings,
    })
}

fn project_alliance(
    alliance: AllianceColor,
    teams: &[u32],
    history: &HistoryIndex,
    config: &EngineConfig,
    warnings: &mut Vec<ScoutWarning>,
) -> ScoutResult<AllianceProjection> {
    if teams.len() > MAX_ALLIANCE_SIZE {
        return Err(ScoutError::AllianceTooLarge {
            alliance,
            count: teams.len(),
        });
    }
    let distinct: BTreeSet<u32> = teams.iter().copied().collect();
    if distinct.len() != teams.len() {
        return Err(ScoutError::invalid(
            "alliance_teams",
            format!("{} alliance lists a team twice: {:?}", alliance, teams),
        ));
    }

    let weights = config.prediction.get_alliance_weights()?;

    let mut members: Vec<TeamAggregate> = Vec::with_capacity(teams.len());
    for &team in teams {
        match history.get(&team) {
            Some(agg) if agg.matches_played > 0 => members.push(agg.clone()),
            _ => {
                warn!("Team {} has no scouted matches; projecting zero", team);
                warnings.push(ScoutWarning::InsufficientData { team_number: team });
                members.push(TeamAggregate {
                    team_number: team,
                    ..Default::default()
                });
            }
        }
    }

    members.sort_by(|a, b| {
        b.mean_total
            .total_cmp(&a.mean_total)
            .then(a.team_number.cmp(&b.team_number))
    });

    let contributions: Vec<TeamContribution> = members
        .iter()
        .zip(weights)
        .map(|(agg, weight)| TeamContribution {
            team_number: agg.team_number,
            mean_total: agg.mean_total,
            std_total: agg.std_total,
            weight,
            matches_played: agg.matches_played,
            insufficient_data: agg.matches_played == 0,
        })
        .collect();

    let raw_score: f64 = contributions.iter().map(|c| c.weight * c.mean_total).sum();
    let std_dev = contributions
        .iter()
        .map(|c| (c.weight * c.std_total).powi(2))
        .sum::<f64>()
        .sqrt();

    let climb_rates: Vec<f64> = members.iter().map(|m| m.climb_rate).collect();
    let harmony_probability = harmony_probability(&climb_rates);

    let mut combined_coral = [0.0; CORAL_LEVELS];
    for m in &members {
        for (total, avg) in combined_coral.iter_mut().zip(m.mean_coral_by_level) {
            *total += avg;
        }
    }
    let coop_probability = coop_probability(&combined_coral, &config.bonus);

    let expected_bonus = config.bonus.harmony_bonus_points as f64 * harmony_probability
        + config.bonus.coop_bonus_points as f64 * coop_probability;

    let projected_score = (raw_score + expected_bonus).max(0.0);
    let margin = config.prediction.confidence_z * std_dev;

    Ok(AllianceProjection {
        alliance,
        teams: contributions,
        raw_score,
        std_dev,
        harmony_probability,
        coop_probability,
        expected_bonus,
        projected_score,
        ci_low: (projected_score - margin).max(0.0),
        ci_high: projected_score + margin,
        win_probability: 0.0,
    })
}

fn side_total(teams: &[u32], history: &HistoryIndex, metric: ComparisonMetric) -> f64 {
    teams
        .iter()
        .filter_map(|t| history.get(t))
        .map(|a| match metric {
            ComparisonMetric::Total => a.mean_total,
            ComparisonMetric::Auto => a.mean_auto,
            ComparisonMetric::Teleop => a.mean_teleop,
            ComparisonMetric::Endgame => a.mean_endgame,
            ComparisonMetric::Epa => a.mean_epa,
            ComparisonMetric::CoralL1 => a.mean_coral_by_level[0],
            ComparisonMetric::CoralL2 => a.mean_coral_by_level[1],
            ComparisonMetric::CoralL3 => a.mean_coral_by_level[2],
            ComparisonMetric::CoralL4 => a.mean_coral_by_level[3],
            ComparisonMetric::Climbs => a.climb_rate,
        })
        .sum()
}

fn compare(red: &[u32], blue: &[u32], history: &HistoryIndex) -> Vec<MetricComparison> {
    ComparisonMetric::iter()
        .map(|metric| {
            let r = side_total(red, history, metric);
            let b = side_total(blue, history, metric);
            let leader = if r > b {
                Some(AllianceColor::Red)
            } else if b > r {
                Some(AllianceColor::Blue)
            } else {
                None
            };
            MetricComparison {
                metric,
                red: r,
                blue: b,
                leader,
            }
        })
        .collect()
}
