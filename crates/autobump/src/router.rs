//! Event routing

use crate::bumper::AutoBumper;
use crate::event::GitHubEvent;
use autobump_core::BumpPlan;
use gh_client::GitHubClient;

/// Hand an event to the matching handler
pub async fn route<C: GitHubClient + 'static>(
    bumper: &AutoBumper<C>,
    event: &GitHubEvent,
) -> anyhow::Result<BumpPlan> {
    log::debug!("Routing '{}' event", event.name());
    match event {
        GitHubEvent::Push(push) => bumper.handle_push(push).await,
        GitHubEvent::PullRequest(pull_request) => bumper.handle_pull_request(pull_request).await,
    }
}
