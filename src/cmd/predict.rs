use crate::reports;
use clap::Args;
use reefscout::api::ScoutingSession;
use reefscout::config::EngineConfig;
use reefscout::ScoutResult;

#[derive(Args, Debug, Clone)]
pub struct PredictArgs {
    #[command(flatten)]
    pub config: EngineConfig,

    /// Red alliance team numbers, comma separated
    #[arg(long, value_delimiter = ',')]
    pub red: Vec<u32>,

    /// Blue alliance team numbers, comma separated
    #[arg(long, value_delimiter = ',')]
    pub blue: Vec<u32>,
}

pub fn run(args: &PredictArgs, session: &ScoutingSession, json: bool) -> ScoutResult<()> {
    let projection = session.predict(&args.red, &args.blue)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&projection)?);
        return Ok(());
    }

    reports::print_projection(&projection);
    reports::print_warnings(&projection.warnings);
    Ok(())
}
