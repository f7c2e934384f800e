use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use reefscout::alliance::{RejectedRecord, ScoredRecord};
use reefscout::model::AllianceColor;
use reefscout::predictor::{AllianceProjection, MatchupProjection};
use reefscout::stats::{LeaderboardEntry, LeaderboardMetric, TeamAggregate};
use std::collections::BTreeMap;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_right(table: &mut Table, cols: std::ops::RangeInclusive<usize>) {
    for i in cols {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

fn alliance_cell(color: AllianceColor) -> Cell {
    match color {
        AllianceColor::Red => Cell::new("Red").fg(Color::Red),
        AllianceColor::Blue => Cell::new("Blue").fg(Color::Blue),
    }
}

fn pct(v: Option<f64>) -> String {
    v.map(|x| format!("{:.1}%", x * 100.0))
        .unwrap_or_else(|| "N/A".to_string())
}

pub fn scores(rows: &[&ScoredRecord]) {
    let mut table = new_table();

    table.add_row(vec![
        Cell::new("Match").add_attribute(Attribute::Bold),
        Cell::new("Alliance"),
        Cell::new("Team").add_attribute(Attribute::Bold),
        Cell::new("Auto"),
        Cell::new("Teleop"),
        Cell::new("Endgame"),
        Cell::new("Co-op").fg(Color::Green),
        Cell::new("Harmony").fg(Color::Green),
        Cell::new("Total").fg(Color::Cyan),
        Cell::new("EPA").add_attribute(Attribute::Bold),
    ]);
    align_right(&mut table, 3..=9);

    for r in rows {
        let epa_cell = if r.epa > 0.0 {
            Cell::new(format!("{:+.1}", r.epa)).fg(Color::Green)
        } else if r.epa < 0.0 {
            Cell::new(format!("{:+.1}", r.epa)).fg(Color::Red)
        } else {
            Cell::new(format!("{:.1}", r.epa))
        };

        table.add_row(vec![
            Cell::new(&r.record.match_number),
            alliance_cell(r.record.alliance_color),
            Cell::new(r.record.team_number).add_attribute(Attribute::Bold),
            Cell::new(r.score.auto_score),
            Cell::new(r.score.teleop_score),
            Cell::new(r.score.endgame_score),
            Cell::new(r.coop_bonus),
            Cell::new(r.harmony_bonus),
            Cell::new(r.score.total_score).fg(Color::Cyan),
            epa_cell,
        ]);
    }
    println!("\n{}", table);
}

pub fn rejections(rejected: &[RejectedRecord]) {
    if rejected.is_empty() {
        return;
    }
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Row").add_attribute(Attribute::Bold),
        Cell::new("Team"),
        Cell::new("Match"),
        Cell::new("Excluded Because").fg(Color::Red),
    ]);

    for r in rejected {
        table.add_row(vec![
            Cell::new(r.index),
            Cell::new(r.team_number.map(|t| t.to_string()).unwrap_or_default()),
            Cell::new(r.match_number.clone().unwrap_or_default()),
            Cell::new(&r.error),
        ]);
    }
    println!("\n❌ Rejected submissions\n{}", table);
}

pub fn leaderboard(
    metric: LeaderboardMetric,
    entries: &[LeaderboardEntry],
    aggregates: &BTreeMap<u32, TeamAggregate>,
) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Team").add_attribute(Attribute::Bold),
        Cell::new(metric.to_string()).fg(Color::Cyan),
        Cell::new("Played"),
        Cell::new("Avg Total"),
        Cell::new("± Std"),
        Cell::new("Avg EPA"),
        Cell::new("Climb"),
        Cell::new("Coral Acc"),
        Cell::new("Algae Acc"),
    ]);
    align_right(&mut table, 2..=9);

    for e in entries {
        let value = match e.value {
            Some(v) if metric.is_ratio() => pct(Some(v)),
            Some(v) => format!("{:.1}", v),
            None => "N/A".to_string(),
        };
        let Some(agg) = aggregates.get(&e.team_number) else {
            continue;
        };

        table.add_row(vec![
            Cell::new(e.rank),
            Cell::new(e.team_number).add_attribute(Attribute::Bold),
            Cell::new(value).fg(Color::Cyan),
            Cell::new(e.matches_played),
            Cell::new(format!("{:.1}", agg.mean_total)),
            Cell::new(format!("{:.1}", agg.std_total)),
            Cell::new(format!("{:+.1}", agg.mean_epa)),
            Cell::new(pct(Some(agg.climb_rate))),
            Cell::new(pct(agg.coral_accuracy)),
            Cell::new(pct(agg.algae_accuracy)),
        ]);
    }
    println!("\n🏆 Leaderboard by {}\n{}", metric, table);
}

fn projection_rows(table: &mut Table, p: &AllianceProjection) {
    let teams = p
        .teams
        .iter()
        .map(|t| {
            if t.insufficient_data {
                format!("{}*", t.team_number)
            } else {
                t.team_number.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(", ");

    table.add_row(vec![
        alliance_cell(p.alliance).add_attribute(Attribute::Bold),
        Cell::new(teams),
        Cell::new(format!("{:.1}", p.raw_score)),
        Cell::new(format!("{:.1}", p.expected_bonus)),
        Cell::new(format!("{:.1}", p.projected_score)).fg(Color::Cyan),
        Cell::new(format!("{:.1} – {:.1}", p.ci_low, p.ci_high)),
        Cell::new(format!("{:.0}%", p.harmony_probability * 100.0)),
        Cell::new(format!("{:.0}%", p.coop_probability * 100.0)),
        Cell::new(format!("{:.1}%", p.win_probability)).add_attribute(Attribute::Bold),
    ]);
}

pub fn projection(m: &MatchupProjection) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Alliance").add_attribute(Attribute::Bold),
        Cell::new("Teams"),
        Cell::new("Weighted"),
        Cell::new("Bonus"),
        Cell::new("Projected").fg(Color::Cyan),
        Cell::new("95% CI"),
        Cell::new("Harmony"),
        Cell::new("Co-op"),
        Cell::new("Win").add_attribute(Attribute::Bold),
    ]);
    align_right(&mut table, 2..=8);

    projection_rows(&mut table, &m.red);
    projection_rows(&mut table, &m.blue);
    println!("\n🔮 Match Prediction\n{}", table);

    if m.red.has_insufficient_data() || m.blue.has_insufficient_data() {
        println!("   * no scouted matches, counted as zero");
    }

    let mut cmp = new_table();
    cmp.add_row(vec![
        Cell::new("Metric").add_attribute(Attribute::Bold),
        Cell::new("Red").fg(Color::Red),
        Cell::new("Blue").fg(Color::Blue),
        Cell::new("Edge"),
    ]);
    align_right(&mut cmp, 1..=2);

    for row in &m.comparison {
        let edge = match row.leader {
            Some(color) => alliance_cell(color),
            None => Cell::new("="),
        };
        cmp.add_row(vec![
            Cell::new(row.metric.to_string()),
            Cell::new(format!("{:.1}", row.red)),
            Cell::new(format!("{:.1}", row.blue)),
            edge,
        ]);
    }
    println!("\n{}", cmp);
}
