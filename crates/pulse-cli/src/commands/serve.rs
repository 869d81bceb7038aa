use std::sync::Arc;

use anyhow::Context;
use pulse_auth::Authenticator;
use pulse_db::demo::{DEMO_EMAIL, DEMO_SLUG};
use pulse_server::ServerState;

use crate::cli::root_commands::ServeArgs;
use crate::context::AppContext;

/// Run the API until ctrl-c. The in-memory store gets the demo tenant first
/// when `general.seed_demo_data` is on.
pub async fn handle(args: &ServeArgs, ctx: AppContext) -> anyhow::Result<()> {
    let auth = Authenticator::from_config(&ctx.config.auth)
        .context("auth is not usable; set PULSE_AUTH__JWT_SECRET")?;

    if ctx.is_memory() {
        tracing::warn!("no database url configured; data lives in memory and is lost on exit");
        if ctx.config.general.seed_demo_data {
            let report = ctx.seed_demo().await?;
            tracing::info!(
                slug = DEMO_SLUG,
                email = DEMO_EMAIL,
                submissions = report.submissions,
                "demo business ready; see `pulse serve --help` for the sign-in"
            );
        }
    }

    let (mut config, store) = ctx.into_parts();
    if let Some(host) = &args.host {
        config.server.host.clone_from(host);
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let state = Arc::new(ServerState::new(store, auth, config.general));
    pulse_server::serve(state, &config.server)
        .await
        .context("pulse server failed")
}
