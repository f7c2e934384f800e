use crate::reports;
use clap::Args;
use reefscout::api::ScoutingSession;
use reefscout::config::EngineConfig;
use reefscout::stats::LeaderboardMetric;
use reefscout::ScoutResult;

#[derive(Args, Debug, Clone)]
pub struct LeaderboardArgs {
    #[command(flatten)]
    pub config: EngineConfig,

    #[arg(short = 'M', long, default_value = "total_score")]
    pub metric: LeaderboardMetric,

    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

pub fn run(args: &LeaderboardArgs, session: &ScoutingSession, json: bool) -> ScoutResult<()> {
    let mut entries = session.leaderboard(args.metric)?;
    if let Some(limit) = args.limit {
        entries.truncate(limit);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No teams scouted yet.");
        return Ok(());
    }

    reports::print_leaderboard(args.metric, &entries, session.aggregates()?);
    Ok(())
}
