#![allow(dead_code)]

use reefscout::model::{RawMatchNumber, RawMatchRecord};

/// Builder for RawMatchRecord. Starts fully populated with zeros, no taxi, no climb.
pub struct RecordBuilder {
    raw: RawMatchRecord,
}

impl RecordBuilder {
    pub fn new(team: i64, match_number: i64, alliance: &str) -> Self {
        Self {
            raw: RawMatchRecord {
                team_number: Some(team),
                match_number: Some(RawMatchNumber::Number(match_number)),
                alliance_color: Some(alliance.to_string()),
                auto_taxi_left: Some(false),
                auto_coral_l1: Some(0),
                auto_coral_l2: Some(0),
                auto_coral_l3: Some(0),
                auto_coral_l4: Some(0),
                auto_coral_l1_missed: Some(0),
                auto_coral_l2_missed: Some(0),
                auto_coral_l3_missed: Some(0),
                auto_coral_l4_missed: Some(0),
                auto_algae_barge: Some(0),
                auto_algae_barge_missed: Some(0),
                auto_algae_processor: Some(0),
                auto_algae_processor_missed: Some(0),
                auto_algae_removed: Some(0),
                teleop_coral_l1: Some(0),
                teleop_coral_l2: Some(0),
                teleop_coral_l3: Some(0),
                teleop_coral_l4: Some(0),
                teleop_coral_l1_missed: Some(0),
                teleop_coral_l2_missed: Some(0),
                teleop_coral_l3_missed: Some(0),
                teleop_coral_l4_missed: Some(0),
                teleop_algae_barge: Some(0),
                teleop_algae_barge_missed: Some(0),
                teleop_algae_processor: Some(0),
                teleop_algae_processor_missed: Some(0),
                teleop_algae_removed: Some(0),
                climb_status: Some("None".to_string()),
                scout_name: None,
                comments: None,
                decode_error: None,
            },
        }
    }

    pub fn match_text(mut self, text: &str) -> Self {
        self.raw.match_number = Some(RawMatchNumber::Text(text.to_string()));
        self
    }

    pub fn taxi(mut self, left: bool) -> Self {
        self.raw.auto_taxi_left = Some(left);
        self
    }

    /// Auto coral scored on levels L1..L4.
    pub fn auto_coral(mut self, levels: [i64; 4]) -> Self {
        self.raw.auto_coral_l1 = Some(levels[0]);
        self.raw.auto_coral_l2 = Some(levels[1]);
        self.raw.auto_coral_l3 = Some(levels[2]);
        self.raw.auto_coral_l4 = Some(levels[3]);
        self
    }

    /// Teleop coral scored on levels L1..L4.
    pub fn teleop_coral(mut self, levels: [i64; 4]) -> Self {
        self.raw.teleop_coral_l1 = Some(levels[0]);
        self.raw.teleop_coral_l2 = Some(levels[1]);
        self.raw.teleop_coral_l3 = Some(levels[2]);
        self.raw.teleop_coral_l4 = Some(levels[3]);
        self
    }

    pub fn teleop_coral_missed(mut self, levels: [i64; 4]) -> Self {
        self.raw.teleop_coral_l1_missed = Some(levels[0]);
        self.raw.teleop_coral_l2_missed = Some(levels[1]);
        self.raw.teleop_coral_l3_missed = Some(levels[2]);
        self.raw.teleop_coral_l4_missed = Some(levels[3]);
        self
    }

    pub fn auto_algae(mut self, barge: i64, processor: i64, removed: i64) -> Self {
        self.raw.auto_algae_barge = Some(barge);
        self.raw.auto_algae_processor = Some(processor);
        self.raw.auto_algae_removed = Some(removed);
        self
    }

    pub fn teleop_algae(mut self, barge: i64, processor: i64, removed: i64) -> Self {
        self.raw.teleop_algae_barge = Some(barge);
        self.raw.teleop_algae_processor = Some(processor);
        self.raw.teleop_algae_removed = Some(removed);
        self
    }

    pub fn climb(mut self, status: &str) -> Self {
        self.raw.climb_status = Some(status.to_string());
        self
    }

    pub fn edit(mut self, f: impl FnOnce(&mut RawMatchRecord)) -> Self {
        f(&mut self.raw);
        self
    }

    pub fn build(self) -> RawMatchRecord {
        self.raw
    }
}

/// A team that scores `points` in teleop L1 coral and nothing else.
pub fn team_scoring(team: i64, match_number: i64, alliance: &str, points: i64) -> RawMatchRecord {
    RecordBuilder::new(team, match_number, alliance)
        .teleop_coral([points, 0, 0, 0])
        .build()
}
