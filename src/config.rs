use crate::consts::MAX_ALLIANCE_SIZE;
use crate::error::{ScoutError, ScoutResult};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    #[command(flatten)]
    pub bonus: BonusRules,
    #[command(flatten)]
    pub prediction: PredictionParams,
}

#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusRules {
    // === CO-OP ===
    /// Combined coral on a level needed for that level to count
    #[arg(long, default_value_t = 5)]
    pub coop_level_threshold: u32,
    #[arg(long, default_value_t = 3)]
    pub coop_levels_required: usize,
    #[arg(long, default_value_t = 15)]
    pub coop_bonus_points: u32,

    // === HARMONY ===
    #[arg(long, default_value_t = 15)]
    pub harmony_bonus_points: u32,
}

impl Default for BonusRules {
    fn default() -> Self {
        Self {
            coop_level_threshold: 5,
            coop_levels_required: 3,
            coop_bonus_points: 15,
            harmony_bonus_points: 15,
        }
    }
}

#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionParams {
    /// Positional weights for the best, second and third team
    #[arg(long, default_value = "1.0,0.8,0.6")]
    pub alliance_weights: String,
    /// Logistic sensitivity applied to the projected score difference
    #[arg(long, default_value_t = 0.1)]
    pub win_sensitivity: f64,
    /// z-score for the confidence interval (1.96 = 95%)
    #[arg(long, default_value_t = 1.96)]
    pub confidence_z: f64,
}

impl Default for PredictionParams {
    fn default() -> Self {
        Self {
            alliance_weights: "1.0,0.8,0.6".to_string(),
            win_sensitivity: 0.1,
            confidence_z: 1.96,
        }
    }
}

impl PredictionParams {
    pub fn get_alliance_weights(&self) -> ScoutResult<[f64; MAX_ALLIANCE_SIZE]> {
        let weights = parse_f64_array::<MAX_ALLIANCE_SIZE>(&self.alliance_weights, "alliance_weights")?;
        if weights.iter().any(|w| *w < 0.0) {
            return Err(ScoutError::Config(format!(
                "alliance_weights must be non-negative, got '{}'",
                self.alliance_weights
            )));
        }
        Ok(weights)
    }
}

impl EngineConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ScoutResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ScoutResult<()> {
        self.prediction.get_alliance_weights()?;

        if !self.prediction.win_sensitivity.is_finite() {
            return Err(ScoutError::Config(
                "win_sensitivity must be finite".to_string(),
            ));
        }
        if !self.prediction.confidence_z.is_finite() || self.prediction.confidence_z < 0.0 {
            return Err(ScoutError::Config(
                "confidence_z must be a non-negative number".to_string(),
            ));
        }
        if self.bonus.coop_levels_required == 0 {
            return Err(ScoutError::Config(
                "coop_levels_required must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Copies over only the flags the user actually typed, leaving file values intact.
    pub fn merge_from_cli(&mut self, cli: &EngineConfig, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field.clone();
                }
            };
        }

        update_if_present!(bonus.coop_level_threshold);
        update_if_present!(bonus.coop_levels_required);
        update_if_present!(bonus.coop_bonus_points);
        update_if_present!(bonus.harmony_bonus_points);

        update_if_present!(prediction.alliance_weights);
        update_if_present!(prediction.win_sensitivity);
        update_if_present!(prediction.confidence_z);
    }
}

fn parse_f64_array<const N: usize>(s: &str, name: &str) -> ScoutResult<[f64; N]> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != N {
        return Err(ScoutError::Config(format!(
            "--{} requires {} values, got {}",
            name,
            N,
            parts.len()
        )));
    }
    let mut arr = [0.0; N];
    for (i, p) in parts.iter().enumerate() {
        arr[i] = p
            .trim()
            .parse()
            .map_err(|_| ScoutError::Config(format!("Invalid number '{}' in {}", p.trim(), name)))?;
    }
    Ok(arr)
}
