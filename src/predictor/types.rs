use crate::error::ScoutWarning;
use crate::model::AllianceColor;
use serde::Serialize;
use strum_macros::{Display, EnumIter};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamContribution {
    pub team_number: u32,
    pub mean_total: f64,
    pub std_total: f64,
    /// Positional weight after sorting by mean.
    pub weight: f64,
    pub matches_played: usize,
    pub insufficient_data: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllianceProjection {
    pub alliance: AllianceColor,
    /// Best scouted team first.
    pub teams: Vec<TeamContribution>,
    pub raw_score: f64,
    pub std_dev: f64,
    pub harmony_probability: f64,
    pub coop_probability: f64,
    pub expected_bonus: f64,
    pub projected_score: f64,
    pub ci_low: f64,
    pub ci_high: f64,
    /// Percent, 0..=100.
    pub win_probability: f64,
}

impl AllianceProjection {
    pub fn has_insufficient_data(&self) -> bool {
        self.teams.iter().any(|t| t.insufficient_data)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonMetric {
    #[strum(to_string = "Avg Total")]
    Total,
    #[strum(to_string = "Avg Auto")]
    Auto,
    #[strum(to_string = "Avg Teleop")]
    Teleop,
    #[strum(to_string = "Avg Endgame")]
    Endgame,
    #[strum(to_string = "Avg EPA")]
    Epa,
    #[strum(to_string = "Coral L1")]
    CoralL1,
    #[strum(to_string = "Coral L2")]
    CoralL2,
    #[strum(to_string = "Coral L3")]
    CoralL3,
    #[strum(to_string = "Coral L4")]
    CoralL4,
    #[strum(to_string = "Expected Climbs")]
    Climbs,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricComparison {
    pub metric: ComparisonMetric,
    pub red: f64,
    pub blue: f64,
    /// `None` on a tie.
    pub leader: Option<AllianceColor>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchupProjection {
    pub red: AllianceProjection,
    pub blue: AllianceProjection,
    pub comparison: Vec<MetricComparison>,
    pub warnings: Vec<ScoutWarning>,
}

impl MatchupProjection {
    pub fn favorite(&self) -> Option<AllianceColor> {
        if self.red.win_probability > self.blue.win_probability {
            Some(AllianceColor::Red)
        } else if self.blue.win_probability > self.red.win_probability {
            Some(AllianceColor::Blue)
        } else {
            None
        }
    }
}
