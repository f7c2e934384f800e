use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use reefscout::api::ScoutingSession;
use reefscout::config::EngineConfig;
use reefscout::store::JsonFileSource;
use std::process;
use tracing::{error, info, warn, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "Scouting analytics for the reef game", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(global = true, short, long, default_value = "data/scouting.json")]
    records: String,

    #[arg(global = true, long)]
    config: Option<String>,

    /// Emit JSON instead of tables
    #[arg(global = true, long, default_value_t = false)]
    json: bool,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Score(cmd::score::ScoreArgs),
    Leaderboard(cmd::leaderboard::LeaderboardArgs),
    Predict(cmd::predict::PredictArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    info!("🚀 Initializing ReefScout...");

    let (cli_config, sub_name) = match &cli.command {
        Commands::Score(args) => (&args.config, "score"),
        Commands::Leaderboard(args) => (&args.config, "leaderboard"),
        Commands::Predict(args) => (&args.config, "predict"),
    };

    let config = match &cli.config {
        Some(path) => {
            info!("⚖️  Loading config from: {}", path);
            let mut file_config = EngineConfig::load_from_file(path).unwrap_or_else(|e| {
                error!("❌ Failed to load config '{}': {}", path, e);
                process::exit(1);
            });
            if let Some(sub_matches) = matches.subcommand_matches(sub_name) {
                file_config.merge_from_cli(cli_config, sub_matches);
            }
            file_config
        }
        None => cli_config.clone(),
    };

    if let Err(e) = config.validate() {
        error!("❌ {}", e);
        process::exit(1);
    }

    let mut session = ScoutingSession::new(config);
    let source = JsonFileSource::new(&cli.records);
    match session.refresh(&source) {
        Ok(report) if !report.rejected.is_empty() => {
            warn!(
                "⚠️  {} submission(s) excluded from scoring",
                report.rejected.len()
            );
        }
        Ok(_) => {}
        Err(e) => {
            error!("❌ FATAL: could not read records from '{}': {}", cli.records, e);
            process::exit(1);
        }
    }

    let result = match cli.command {
        Commands::Score(args) => cmd::score::run(&args, &session, cli.json),
        Commands::Leaderboard(args) => cmd::leaderboard::run(&args, &session, cli.json),
        Commands::Predict(args) => cmd::predict::run(&args, &session, cli.json),
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}
