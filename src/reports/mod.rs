mod tables;

pub use self::tables::{
    leaderboard as print_leaderboard, projection as print_projection,
    rejections as print_rejections, scores as print_score_table,
};

use reefscout::ScoutWarning;

pub fn print_warnings(warnings: &[ScoutWarning]) {
    if warnings.is_empty() {
        return;
    }
    println!("\n⚠️  {} warning(s):", warnings.len());
    for w in warnings {
        println!("   - {}", w);
    }
}
