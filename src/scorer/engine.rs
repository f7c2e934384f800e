use crate::consts::*;
use crate::model::{ClimbStatus, MatchRecord, PhaseCounters};

fn coral_points(counters: &PhaseCounters, table: &[u32; CORAL_LEVELS]) -> u32 {
    counters
        .coral_scored
        .iter()
        .zip(table)
        .map(|(count, points)| count * points)
        .sum()
}

pub fn auto_points(record: &MatchRecord) -> u32 {
    let c = &record.auto;
    let taxi = if record.auto_taxi_left {
        AUTO_TAXI_POINTS
    } else {
        0
    };

    coral_points(c, &AUTO_CORAL_POINTS)
        + c.algae_barge * AUTO_ALGAE_BARGE_POINTS
        + c.algae_processor * AUTO_ALGAE_PROCESSOR_POINTS
        + c.algae_removed * AUTO_ALGAE_REMOVED_POINTS
        + taxi
}

pub fn teleop_points(record: &MatchRecord) -> u32 {
    let c = &record.teleop;
    coral_points(c, &TELEOP_CORAL_POINTS)
        + c.algae_barge * TELEOP_ALGAE_BARGE_POINTS
        + c.algae_processor * TELEOP_ALGAE_PROCESSOR_POINTS
        + c.algae_removed * TELEOP_ALGAE_REMOVED_POINTS
}

pub fn endgame_points(status: ClimbStatus) -> u32 {
    match status {
        ClimbStatus::None => 0,
        ClimbStatus::Parked => PARK_POINTS,
        ClimbStatus::ShallowClimb => SHALLOW_CLIMB_POINTS,
        ClimbStatus::DeepClimb => DEEP_CLIMB_POINTS,
    }
}
