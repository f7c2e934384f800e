use crate::config::BonusRules;
use crate::consts::CORAL_LEVELS;
use crate::model::MatchRecord;
use std::collections::BTreeSet;

/// Everything about one (match, alliance) group that the bonuses depend on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupTally {
    pub coral_by_level: [u32; CORAL_LEVELS],
    pub team_count: usize,
    pub climb_count: usize,
}

impl GroupTally {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a MatchRecord>,
    {
        let mut coral_by_level = [0u32; CORAL_LEVELS];
        let mut teams = BTreeSet::new();
        let mut climbers = BTreeSet::new();

        for record in records {
            for (total, count) in coral_by_level.iter_mut().zip(record.coral_by_level()) {
                *total = total.saturating_add(count);
            }
            teams.insert(record.team_number);
            if record.climb_status.is_climb() {
                climbers.insert(record.team_number);
            }
        }

        Self {
            coral_by_level,
            team_count: teams.len(),
            climb_count: climbers.len(),
        }
    }
}

/// Number of levels whose combined coral reaches the threshold.
pub fn levels_reached(coral_by_level: &[u32; CORAL_LEVELS], threshold: u32) -> usize {
    coral_by_level.iter().filter(|&&c| c >= threshold).count()
}

pub fn coop_bonus(coral_by_level: &[u32; CORAL_LEVELS], rules: &BonusRules) -> u32 {
    if levels_reached(coral_by_level, rules.coop_level_threshold) >= rules.coop_levels_required {
        rules.coop_bonus_points
    } else {
        0
    }
}

pub fn harmony_bonus(team_count: usize, climb_count: usize, rules: &BonusRules) -> u32 {
    if team_count > 0 && climb_count == team_count {
        rules.harmony_bonus_points
    } else {
        0
    }
}
