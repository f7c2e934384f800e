use reefscout::alliance::{aggregate, AllianceKey};
use reefscout::config::BonusRules;
use reefscout::model::{AllianceColor, MatchKey};
use reefscout::ScoutWarning;

mod common;
use common::{team_scoring, RecordBuilder};

fn key(match_number: u64, alliance: AllianceColor) -> AllianceKey {
    AllianceKey {
        match_number: MatchKey::from_number(match_number),
        alliance,
    }
}

// --- CO-OP ---
#[test]
fn test_coop_three_levels_across_two_teams() {
    // Combined per level: [5, 5, 5, 0]
    let records = vec![
        RecordBuilder::new(1, 1, "Red")
            .auto_coral([2, 0, 1, 0])
            .teleop_coral([1, 5, 0, 0])
            .build(),
        RecordBuilder::new(2, 1, "Red")
            .teleop_coral([2, 0, 4, 0])
            .build(),
    ];
    let report = aggregate(&records, &BonusRules::default());
    let bonus = report.bonus_for(&key(1, AllianceColor::Red)).unwrap();

    assert_eq!(bonus.coral_by_level, [5, 5, 5, 0]);
    assert_eq!(bonus.coop_bonus, 15);
    for r in &report.records {
        assert_eq!(r.coop_bonus, 15);
        assert_eq!(r.score.total_score, r.raw_total + 15);
    }
}

#[test]
fn test_coop_two_levels_is_not_enough() {
    let records = vec![
        RecordBuilder::new(1, 1, "Red").teleop_coral([5, 0, 0, 0]).build(),
        RecordBuilder::new(2, 1, "Red").teleop_coral([0, 5, 0, 0]).build(),
    ];
    let report = aggregate(&records, &BonusRules::default());
    let bonus = report.bonus_for(&key(1, AllianceColor::Red)).unwrap();
    assert_eq!(bonus.coral_by_level, [5, 5, 0, 0]);
    assert_eq!(bonus.coop_bonus, 0);
}

#[test]
fn test_coop_no_coral_is_zero() {
    let records = vec![
        RecordBuilder::new(1, 3, "Blue").build(),
        RecordBuilder::new(2, 3, "Blue").build(),
    ];
    let report = aggregate(&records, &BonusRules::default());
    assert_eq!(report.bonus_for(&key(3, AllianceColor::Blue)).unwrap().coop_bonus, 0);
}

// --- HARMONY ---
#[test]
fn test_harmony_all_three_climb() {
    let records = vec![
        RecordBuilder::new(1, 2, "Blue").climb("Deep Climb").build(),
        RecordBuilder::new(2, 2, "Blue").climb("Shallow Climb").build(),
        RecordBuilder::new(3, 2, "Blue").climb("Deep Climb").build(),
    ];
    let report = aggregate(&records, &BonusRules::default());
    let bonus = report.bonus_for(&key(2, AllianceColor::Blue)).unwrap();
    assert_eq!(bonus.team_count, 3);
    assert_eq!(bonus.climb_count, 3);
    assert_eq!(bonus.harmony_bonus, 15);
    assert!(report.records.iter().all(|r| r.harmony_bonus == 15));
}

#[test]
fn test_harmony_two_of_three_gets_nothing() {
    let records = vec![
        RecordBuilder::new(1, 2, "Blue").climb("Deep Climb").build(),
        RecordBuilder::new(2, 2, "Blue").climb("Shallow Climb").build(),
        RecordBuilder::new(3, 2, "Blue").climb("Parked").build(),
    ];
    let report = aggregate(&records, &BonusRules::default());
    assert_eq!(report.bonus_for(&key(2, AllianceColor::Blue)).unwrap().harmony_bonus, 0);
}

#[test]
fn test_harmony_counts_teams_not_duplicate_records() {
    // Team 1 scouted twice, both climbing; team 2 stays down.
    // Two climbing records equal two teams, but only one team climbed.
    let records = vec![
        RecordBuilder::new(1, 6, "Red").climb("Deep Climb").build(),
        RecordBuilder::new(1, 6, "Red").climb("Deep Climb").build(),
        RecordBuilder::new(2, 6, "Red").climb("Parked").build(),
    ];
    let report = aggregate(&records, &BonusRules::default());
    let bonus = report.bonus_for(&key(6, AllianceColor::Red)).unwrap();
    assert_eq!(bonus.team_count, 2);
    assert_eq!(bonus.climb_count, 1);
    assert_eq!(bonus.harmony_bonus, 0);
}

#[test]
fn test_harmony_with_duplicate_scouting_of_climbers() {
    // Conflicting duplicate reports: the team climbed in at least one.
    let records = vec![
        RecordBuilder::new(1, 6, "Blue").climb("Shallow Climb").build(),
        RecordBuilder::new(1, 6, "Blue").climb("None").build(),
        RecordBuilder::new(2, 6, "Blue").climb("Deep Climb").build(),
    ];
    let report = aggregate(&records, &BonusRules::default());
    let bonus = report.bonus_for(&key(6, AllianceColor::Blue)).unwrap();
    assert_eq!(bonus.team_count, 2);
    assert_eq!(bonus.climb_count, 2);
    assert_eq!(bonus.harmony_bonus, 15);
}

#[test]
fn test_bonus_rules_are_configurable() {
    let rules = BonusRules {
        harmony_bonus_points: 20,
        ..Default::default()
    };
    let records = vec![RecordBuilder::new(9, 4, "Red").climb("Shallow").build()];
    let report = aggregate(&records, &rules);
    assert_eq!(report.records[0].harmony_bonus, 20);
    assert_eq!(report.records[0].score.total_score, 6 + 20);
}

// --- EPA ---
#[test]
fn test_single_team_group_has_zero_epa_and_warns() {
    let records = vec![team_scoring(7, 5, "Red", 30)];
    let report = aggregate(&records, &BonusRules::default());

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].epa, 0.0);
    assert_eq!(
        report.warnings,
        vec![ScoutWarning::DegenerateGroup {
            match_number: "5".to_string(),
            alliance: AllianceColor::Red,
            members: 1,
        }]
    );
}

#[test]
fn test_epa_is_relative_to_alliance_mean() {
    let records = vec![
        team_scoring(1, 1, "Red", 10),
        team_scoring(2, 1, "Red", 20),
        team_scoring(3, 1, "Red", 30),
    ];
    let report = aggregate(&records, &BonusRules::default());
    let epas: Vec<(u32, f64)> = report
        .records
        .iter()
        .map(|r| (r.record.team_number, r.epa))
        .collect();
    assert_eq!(epas, vec![(1, -10.0), (2, 0.0), (3, 10.0)]);
}

#[test]
fn test_epa_sums_to_zero_per_group() {
    let records = vec![
        team_scoring(1, 1, "Red", 13),
        team_scoring(2, 1, "Red", 4),
        team_scoring(3, 1, "Red", 27),
        team_scoring(4, 1, "Blue", 8),
        team_scoring(5, 1, "Blue", 19),
    ];
    let report = aggregate(&records, &BonusRules::default());
    for bonus in &report.bonuses {
        let sum: f64 = report.records_for(&bonus.key).map(|r| r.epa).sum();
        assert!(sum.abs() < 1e-9, "EPA sum for {:?} was {}", bonus.key, sum);
    }
}

// --- GROUPING ---
#[test]
fn test_group_keys_are_normalized() {
    let records = vec![
        RecordBuilder::new(1, 7, "Red").climb("Deep Climb").build(),
        RecordBuilder::new(2, 0, " RED ")
            .match_text("007")
            .climb("Deep Climb")
            .build(),
        RecordBuilder::new(3, 0, "red")
            .match_text("7")
            .climb("Shallow Climb")
            .build(),
    ];
    let report = aggregate(&records, &BonusRules::default());
    assert_eq!(report.bonuses.len(), 1);
    let bonus = report.bonus_for(&key(7, AllianceColor::Red)).unwrap();
    assert_eq!(bonus.team_count, 3);
    assert_eq!(bonus.harmony_bonus, 15);
}

#[test]
fn test_alliances_in_same_match_are_separate() {
    let records = vec![
        team_scoring(1, 1, "Red", 10),
        team_scoring(2, 1, "Blue", 40),
    ];
    let report = aggregate(&records, &BonusRules::default());
    assert_eq!(report.bonuses.len(), 2);
    assert!(report.records.iter().all(|r| r.epa == 0.0));
}

// --- EXCLUSION ---
#[test]
fn test_record_missing_counter_is_excluded() {
    let records = vec![
        team_scoring(1, 1, "Red", 10),
        RecordBuilder::new(2, 1, "Red")
            .teleop_coral([50, 50, 50, 0])
            .edit(|r| r.auto_coral_l1 = None)
            .build(),
        team_scoring(3, 1, "Red", 20),
    ];
    let report = aggregate(&records, &BonusRules::default());

    assert_eq!(report.records.len(), 2);
    assert!(report.records.iter().all(|r| r.record.team_number != 2));
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].index, 1);
    assert_eq!(report.rejected[0].team_number, Some(2));
    assert!(report.rejected[0].error.contains("auto_coral_l1"));

    // Team 2's coral would have earned co-op; excluded, it must not.
    let bonus = report.bonus_for(&key(1, AllianceColor::Red)).unwrap();
    assert_eq!(bonus.coop_bonus, 0);
    assert_eq!(bonus.team_count, 2);
}

#[test]
fn test_invalid_record_does_not_abort() {
    let records = vec![
        RecordBuilder::new(1, 1, "Red").climb("Levitating").build(),
        RecordBuilder::new(2, 1, "Purple").build(),
        team_scoring(3, 1, "Red", 5),
    ];
    let report = aggregate(&records, &BonusRules::default());
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.rejected.len(), 2);
}

#[test]
fn test_absurd_counter_is_excluded_not_fatal() {
    let records = vec![
        team_scoring(1, 1, "Red", 10),
        RecordBuilder::new(2, 1, "Red")
            .edit(|r| r.auto_coral_l4 = Some(400_000_000))
            .build(),
    ];
    let report = aggregate(&records, &BonusRules::default());
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.rejected.len(), 1);
    assert!(report.rejected[0].error.contains("auto_coral_l4"));
}

#[test]
fn test_reaggregation_is_identical() {
    let records = vec![
        team_scoring(3, 2, "Blue", 9),
        RecordBuilder::new(1, 1, "Red").climb("Deep").build(),
        team_scoring(2, 1, "Red", 12),
        team_scoring(4, 10, "Red", 1),
    ];
    let first = aggregate(&records, &BonusRules::default());
    let second = aggregate(&records, &BonusRules::default());
    assert_eq!(first, second);

    // Numeric match order, not lexical
    let order: Vec<&str> = first
        .bonuses
        .iter()
        .map(|b| b.key.match_number.as_str())
        .collect();
    assert_eq!(order, vec!["1", "2", "10"]);
}

#[test]
fn test_report_serializes_flat_record_fields() {
    let records = vec![team_scoring(1, 1, "Red", 10)];
    let report = aggregate(&records, &BonusRules::default());
    let json = serde_json::to_value(&report.records[0]).unwrap();
    assert_eq!(json["team_number"], 1);
    assert_eq!(json["total_score"], 10);
    assert_eq!(json["coop_bonus"], 0);
    assert_eq!(json["epa"], 0.0);
}
