/// Number of coral reef levels (L1..=L4).
pub const CORAL_LEVELS: usize = 4;

/// Largest believable value for a single counter in one match.
pub const MAX_COUNTER: u32 = 999;

/// Maximum number of teams on one alliance.
pub const MAX_ALLIANCE_SIZE: usize = 3;

/// Auto coral points per level, L1 first.
pub const AUTO_CORAL_POINTS: [u32; CORAL_LEVELS] = [3, 5, 8, 12];
pub const AUTO_ALGAE_BARGE_POINTS: u32 = 4;
pub const AUTO_ALGAE_PROCESSOR_POINTS: u32 = 6;
pub const AUTO_ALGAE_REMOVED_POINTS: u32 = 2;
pub const AUTO_TAXI_POINTS: u32 = 4;

/// Teleop coral points per level, L1 first.
pub const TELEOP_CORAL_POINTS: [u32; CORAL_LEVELS] = [1, 2, 4, 6];
pub const TELEOP_ALGAE_BARGE_POINTS: u32 = 2;
pub const TELEOP_ALGAE_PROCESSOR_POINTS: u32 = 6;
pub const TELEOP_ALGAE_REMOVED_POINTS: u32 = 1;

pub const PARK_POINTS: u32 = 3;
pub const SHALLOW_CLIMB_POINTS: u32 = 6;
pub const DEEP_CLIMB_POINTS: u32 = 12;
