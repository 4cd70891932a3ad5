use autobump_config::Config;
use gh_client::{CachedGitHubClient, OctocrabClient};
use std::process::ExitCode;

mod bumper;
mod event;
mod logger;
#[cfg(test)]
mod mock;
mod router;
mod workflow;

use bumper::{AutoBumper, BumpSettings};
use event::GitHubEvent;
use workflow::WorkflowCommand;

/// Step output carrying the bump plan
const OUTPUT_NAME: &str = "AUTOBUMP_RUN";

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv = autobump_config::load_dotenv();
    logger::init();
    dotenv.log();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            println!(
                "{}",
                WorkflowCommand::Error {
                    message: format!("{:#}", err),
                }
            );
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    let event = GitHubEvent::from_file(&config.event_name, &config.event_path)?;

    if config.dry_run {
        log::info!("Dry run mode enabled, no packages will be reported for bumping");
    }

    let client = CachedGitHubClient::new(OctocrabClient::connect(
        config.github_token.as_str(),
        &config.api_url,
    )?);
    let bumper = AutoBumper::new(client, BumpSettings::from(&config));

    let plan = router::route(&bumper, &event).await?;
    log::debug!(
        "Bump plan covers {} package(s) across branches",
        plan.package_count()
    );

    workflow::set_output(OUTPUT_NAME, &plan.to_string(), config.output_path.as_deref())
}
