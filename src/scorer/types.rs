use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub auto_score: u32,
    pub teleop_score: u32,
    pub endgame_score: u32,
    // Phase sum until the aggregator adds alliance bonuses
    pub total_score: u32,
}

impl ScoreBreakdown {
    pub fn new(auto_score: u32, teleop_score: u32, endgame_score: u32) -> Self {
        Self {
            auto_score,
            teleop_score,
            endgame_score,
            total_score: auto_score + teleop_score + endgame_score,
        }
    }

    pub fn phase_total(&self) -> u32 {
        self.auto_score + self.teleop_score + self.endgame_score
    }

    pub fn with_bonus(mut self, bonus: u32) -> Self {
        self.total_score = self.phase_total().saturating_add(bonus);
        self
    }
}
