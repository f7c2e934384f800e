use crate::reports;
use clap::Args;
use reefscout::api::ScoutingSession;
use reefscout::config::EngineConfig;
use reefscout::model::MatchKey;
use reefscout::ScoutResult;

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub config: EngineConfig,

    /// Only show this match
    #[arg(short = 'm', long = "match")]
    pub match_number: Option<String>,

    /// Only show this team
    #[arg(short, long)]
    pub team: Option<u32>,
}

pub fn run(args: &ScoreArgs, session: &ScoutingSession, json: bool) -> ScoutResult<()> {
    let report = session.report()?;
    let wanted_match = args.match_number.as_deref().map(MatchKey::parse).transpose()?;

    let rows: Vec<_> = report
        .records
        .iter()
        .filter(|r| wanted_match.as_ref().map_or(true, |m| &r.record.match_number == m))
        .filter(|r| args.team.map_or(true, |t| r.record.team_number == t))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No scored records matching criteria.");
    } else {
        reports::print_score_table(&rows);
    }
    reports::print_rejections(&report.rejected);
    reports::print_warnings(&report.warnings);
    Ok(())
}
