use crate::consts::{CORAL_LEVELS, MAX_COUNTER};
use crate::error::{ScoutError, ScoutResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AllianceColor {
    Red,
    Blue,
}

impl AllianceColor {
    /// Case-insensitive; surrounding whitespace is ignored.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" => Some(Self::Red),
            "blue" => Some(Self::Blue),
            _ => None,
        }
    }

}

impl fmt::Display for AllianceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Red => write!(f, "Red"),
            Self::Blue => write!(f, "Blue"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ClimbStatus {
    #[default]
    None,
    Parked,
    ShallowClimb,
    DeepClimb,
}

impl ClimbStatus {
    /// Accepts "Deep Climb", "DeepClimb", "deep_climb", "deep" and so on.
    /// Returns `None` for anything outside the four states.
    pub fn parse(s: &str) -> Option<Self> {
        let folded: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_ascii_lowercase();

        match folded.as_str() {
            "none" | "noclimb" => Some(Self::None),
            "park" | "parked" => Some(Self::Parked),
            "shallow" | "shallowclimb" => Some(Self::ShallowClimb),
            "deep" | "deepclimb" => Some(Self::DeepClimb),
            _ => None,
        }
    }

    /// Shallow and deep climbs count toward the harmony bonus; parking does not.
    pub fn is_climb(self) -> bool {
        match self {
            Self::ShallowClimb | Self::DeepClimb => true,
            Self::None | Self::Parked => false,
        }
    }
}

impl fmt::Display for ClimbStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Parked => write!(f, "Parked"),
            Self::ShallowClimb => write!(f, "Shallow Climb"),
            Self::DeepClimb => write!(f, "Deep Climb"),
        }
    }
}

/// Normalized match identifier used as a grouping key.
///
/// Numeric identifiers are stored in canonical decimal form, so `7`, `"7"`
/// and `"007"` are the same match. Anything else is trimmed and upper-cased.
/// Ordering puts numeric matches first, in numeric order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchKey(String);

impl MatchKey {
    /// Blank text is a missing key; a negative number is invalid.
    pub fn parse(s: &str) -> ScoutResult<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ScoutError::MissingField {
                field: "match_number",
            });
        }
        let negative = trimmed
            .strip_prefix('-')
            .is_some_and(|d| !d.is_empty() && d.bytes().all(|b| b.is_ascii_digit()));
        if negative {
            return Err(ScoutError::invalid("match_number", trimmed));
        }
        match trimmed.parse::<u64>() {
            Ok(n) => Ok(Self(n.to_string())),
            Err(_) => Ok(Self(trimmed.to_ascii_uppercase())),
        }
    }

    pub fn from_number(n: u64) -> Self {
        Self(n.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn numeric(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl Ord for MatchKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for MatchKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for MatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Match identifiers arrive from the form layer as either numbers or text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawMatchNumber {
    Number(i64),
    Text(String),
}

impl From<i64> for RawMatchNumber {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for RawMatchNumber {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// One submission exactly as the form layer produced it.
/// Every field is optional so that absence can be told apart from zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawMatchRecord {
    pub team_number: Option<i64>,
    pub match_number: Option<RawMatchNumber>,
    pub alliance_color: Option<String>,

    pub auto_taxi_left: Option<bool>,
    pub auto_coral_l1: Option<i64>,
    pub auto_coral_l2: Option<i64>,
    pub auto_coral_l3: Option<i64>,
    pub auto_coral_l4: Option<i64>,
    pub auto_coral_l1_missed: Option<i64>,
    pub auto_coral_l2_missed: Option<i64>,
    pub auto_coral_l3_missed: Option<i64>,
    pub auto_coral_l4_missed: Option<i64>,
    pub auto_algae_barge: Option<i64>,
    pub auto_algae_barge_missed: Option<i64>,
    pub auto_algae_processor: Option<i64>,
    pub auto_algae_processor_missed: Option<i64>,
    pub auto_algae_removed: Option<i64>,

    pub teleop_coral_l1: Option<i64>,
    pub teleop_coral_l2: Option<i64>,
    pub teleop_coral_l3: Option<i64>,
    pub teleop_coral_l4: Option<i64>,
    pub teleop_coral_l1_missed: Option<i64>,
    pub teleop_coral_l2_missed: Option<i64>,
    pub teleop_coral_l3_missed: Option<i64>,
    pub teleop_coral_l4_missed: Option<i64>,
    pub teleop_algae_barge: Option<i64>,
    pub teleop_algae_barge_missed: Option<i64>,
    pub teleop_algae_processor: Option<i64>,
    pub teleop_algae_processor_missed: Option<i64>,
    pub teleop_algae_removed: Option<i64>,

    pub climb_status: Option<String>,

    pub scout_name: Option<String>,
    pub comments: Option<String>,

    /// Set by the loader when the submission had mistyped fields and could
    /// not be read. Such a record is always rejected.
    #[serde(skip)]
    pub decode_error: Option<String>,
}

/// Counters for one game phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseCounters {
    /// Coral scored per level, L1 first.
    pub coral_scored: [u32; CORAL_LEVELS],
    pub coral_missed: [u32; CORAL_LEVELS],
    pub algae_barge: u32,
    pub algae_barge_missed: u32,
    pub algae_processor: u32,
    pub algae_processor_missed: u32,
    pub algae_removed: u32,
}

impl PhaseCounters {
    pub fn coral_total(&self) -> u32 {
        self.coral_scored.iter().sum()
    }

    pub fn coral_attempts(&self) -> u32 {
        self.coral_total() + self.coral_missed.iter().sum::<u32>()
    }

    pub fn algae_scored(&self) -> u32 {
        self.algae_barge + self.algae_processor
    }

    pub fn algae_attempts(&self) -> u32 {
        self.algae_scored() + self.algae_barge_missed + self.algae_processor_missed
    }
}

/// A validated scouting observation of one team in one match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub team_number: u32,
    pub match_number: MatchKey,
    pub alliance_color: AllianceColor,
    pub auto: PhaseCounters,
    pub teleop: PhaseCounters,
    pub auto_taxi_left: bool,
    pub climb_status: ClimbStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scout_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

impl MatchRecord {
    /// Auto + teleop coral scored per level.
    pub fn coral_by_level(&self) -> [u32; CORAL_LEVELS] {
        let mut levels = [0; CORAL_LEVELS];
        for (i, level) in levels.iter_mut().enumerate() {
            *level = self.auto.coral_scored[i] + self.teleop.coral_scored[i];
        }
        levels
    }
}

fn counter(value: Option<i64>, field: &'static str) -> ScoutResult<u32> {
    let v = value.ok_or(ScoutError::MissingField { field })?;
    u32::try_from(v)
        .ok()
        .filter(|&c| c <= MAX_COUNTER)
        .ok_or_else(|| ScoutError::invalid(field, v))
}

impl TryFrom<&RawMatchRecord> for MatchRecord {
    type Error = ScoutError;

    fn try_from(raw: &RawMatchRecord) -> ScoutResult<Self> {
        if let Some(e) = &raw.decode_error {
            return Err(ScoutError::invalid("record", e));
        }

        let team = raw.team_number.ok_or(ScoutError::MissingField {
            field: "team_number",
        })?;
        let team_number = u32::try_from(team)
            .ok()
            .filter(|&t| t > 0)
            .ok_or_else(|| ScoutError::invalid("team_number", team))?;

        let match_number = match &raw.match_number {
            None => {
                return Err(ScoutError::MissingField {
                    field: "match_number",
                })
            }
            Some(RawMatchNumber::Number(n)) => u64::try_from(*n)
                .map(MatchKey::from_number)
                .map_err(|_| ScoutError::invalid("match_number", n))?,
            Some(RawMatchNumber::Text(s)) => MatchKey::parse(s)?,
        };

        let color = raw.alliance_color.as_deref().ok_or(ScoutError::MissingField {
            field: "alliance_color",
        })?;
        let alliance_color =
            AllianceColor::parse(color).ok_or_else(|| ScoutError::invalid("alliance_color", color))?;

        let auto = PhaseCounters {
            coral_scored: [
                counter(raw.auto_coral_l1, "auto_coral_l1")?,
                counter(raw.auto_coral_l2, "auto_coral_l2")?,
                counter(raw.auto_coral_l3, "auto_coral_l3")?,
                counter(raw.auto_coral_l4, "auto_coral_l4")?,
            ],
            coral_missed: [
                counter(raw.auto_coral_l1_missed, "auto_coral_l1_missed")?,
                counter(raw.auto_coral_l2_missed, "auto_coral_l2_missed")?,
                counter(raw.auto_coral_l3_missed, "auto_coral_l3_missed")?,
                counter(raw.auto_coral_l4_missed, "auto_coral_l4_missed")?,
            ],
            algae_barge: counter(raw.auto_algae_barge, "auto_algae_barge")?,
            algae_barge_missed: counter(raw.auto_algae_barge_missed, "auto_algae_barge_missed")?,
            algae_processor: counter(raw.auto_algae_processor, "auto_algae_processor")?,
            algae_processor_missed: counter(
                raw.auto_algae_processor_missed,
                "auto_algae_processor_missed",
            )?,
            algae_removed: counter(raw.auto_algae_removed, "auto_algae_removed")?,
        };

        let teleop = PhaseCounters {
            coral_scored: [
                counter(raw.teleop_coral_l1, "teleop_coral_l1")?,
                counter(raw.teleop_coral_l2, "teleop_coral_l2")?,
                counter(raw.teleop_coral_l3, "teleop_coral_l3")?,
                counter(raw.teleop_coral_l4, "teleop_coral_l4")?,
            ],
            coral_missed: [
                counter(raw.teleop_coral_l1_missed, "teleop_coral_l1_missed")?,
                counter(raw.teleop_coral_l2_missed, "teleop_coral_l2_missed")?,
                counter(raw.teleop_coral_l3_missed, "teleop_coral_l3_missed")?,
                counter(raw.teleop_coral_l4_missed, "teleop_coral_l4_missed")?,
            ],
            algae_barge: counter(raw.teleop_algae_barge, "teleop_algae_barge")?,
            algae_barge_missed: counter(
                raw.teleop_algae_barge_missed,
                "teleop_algae_barge_missed",
            )?,
            algae_processor: counter(raw.teleop_algae_processor, "teleop_algae_processor")?,
            algae_processor_missed: counter(
                raw.teleop_algae_processor_missed,
                "teleop_algae_processor_missed",
            )?,
            algae_removed: counter(raw.teleop_algae_removed, "teleop_algae_removed")?,
        };

        let auto_taxi_left = raw.auto_taxi_left.ok_or(ScoutError::MissingField {
            field: "auto_taxi_left",
        })?;

        let climb = raw
            .climb_status
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ScoutError::MissingField {
                field: "climb_status",
            })?;
        let climb_status =
            ClimbStatus::parse(climb).ok_or_else(|| ScoutError::invalid("climb_status", climb))?;

        Ok(Self {
            team_number,
            match_number,
            alliance_color,
            auto,
            teleop,
            auto_taxi_left,
            climb_status,
            scout_name: raw.scout_name.clone(),
            comments: raw.comments.clone(),
        })
    }
}
