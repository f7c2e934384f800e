use crate::model::AllianceColor;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("Missing field: {field}")]
    MissingField { field: &'static str },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },

    #[error("{alliance} alliance has {count} teams (max 3)")]
    AllianceTooLarge {
        alliance: AllianceColor,
        count: usize,
    },

    #[error("No scouting data loaded. Call refresh first.")]
    NotLoaded,

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),
}

impl ScoutError {
    pub(crate) fn invalid(field: &'static str, value: impl fmt::Display) -> Self {
        Self::InvalidValue {
            field,
            value: value.to_string(),
        }
    }
}

pub type ScoutResult<T> = Result<T, ScoutError>;

/// Non-fatal conditions surfaced alongside a result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoutWarning {
    /// A requested team has no scouted history; it contributes zero.
    InsufficientData { team_number: u32 },
    /// A (match, alliance) group with fewer than two scouted teams.
    DegenerateGroup {
        match_number: String,
        alliance: AllianceColor,
        members: usize,
    },
}

impl fmt::Display for ScoutWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientData { team_number } => {
                write!(f, "Team {} has no scouted matches (insufficient data)", team_number)
            }
            Self::DegenerateGroup {
                match_number,
                alliance,
                members,
            } => write!(
                f,
                "Match {} {} alliance has only {} scouted team(s)",
                match_number, alliance, members
            ),
        }
    }
}
