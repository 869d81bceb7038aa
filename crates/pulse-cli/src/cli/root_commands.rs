use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP API.
    ///
    /// Without a database url the in-memory store is seeded with the demo
    /// business `demo-cafe`, signed in as `demo@pulse.local` / `demo-password`.
    Serve(ServeArgs),
    /// Create the demo business in the configured database.
    Seed,
    /// Show how a form's fields are categorized and what a submission yields.
    Categorize(CategorizeArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ServeArgs {
    /// Override `server.host`.
    #[arg(long)]
    pub host: Option<String>,

    /// Override `server.port`.
    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(Clone, Debug, Args)]
pub struct CategorizeArgs {
    /// Form JSON (a field array or an object with `fields`), inline or a file path.
    #[arg(long)]
    pub form: String,

    /// Submission answers as a JSON object, inline or a file path.
    #[arg(long)]
    pub submission: Option<String>,
}
