use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
///
/// `categorize` runs without configuration; the others open the configured
/// store first.
pub async fn dispatch(command: Commands, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Categorize(args) => commands::categorize::handle(&args, flags),
        Commands::Serve(args) => commands::serve::handle(&args, open().await?).await,
        Commands::Seed => commands::seed::handle(&open().await?, flags).await,
    }
}

async fn open() -> anyhow::Result<AppContext> {
    AppContext::init(bootstrap::load_config()?).await
}
