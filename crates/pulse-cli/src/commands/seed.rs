use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Seed the configured database with the demo business.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if ctx.is_memory() {
        anyhow::bail!(
            "seed needs a database url (PULSE_DATABASE__URL); `pulse serve` seeds the in-memory store on its own"
        );
    }
    let report = ctx.seed_demo().await?;
    if report.created {
        tracing::info!(business = %report.business_id, "demo data created");
    } else {
        tracing::info!(business = %report.business_id, "demo data already present");
    }
    output(&report, flags.format)
}
