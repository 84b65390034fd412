use clap::{Parser, Subcommand};

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "solver-cli", version, about = "Solver Society routine logger")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Show or change the routine store endpoint
    Endpoint {
        /// New base URL; prints the current one when omitted
        url: Option<String>,
    },
    /// Sign in with an Agent ID
    Login {
        /// Agent identifier, e.g. Solver001
        agent_id: String,
    },
    /// Sign out; the endpoint is kept
    Logout,
    /// Show endpoint and identity
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compute the score preview for a routine without sending it
    Preview {
        #[command(flatten)]
        draft: commands::routine::DraftArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Log today's routine to the store
    Log {
        #[command(flatten)]
        draft: commands::routine::DraftArgs,
    },
    /// Fetch and show routine history
    History {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init();

    let result = match cli.command {
        Commands::Config { action } => commands::config::run(action),
        Commands::Endpoint { url } => commands::session::endpoint(url),
        Commands::Login { agent_id } => commands::session::login(&agent_id).await,
        Commands::Logout => commands::session::logout().await,
        Commands::Status { json } => commands::session::status(json),
        Commands::Preview { draft, json } => commands::routine::preview(&draft, json),
        Commands::Log { draft } => commands::routine::log(&draft).await,
        Commands::History { json } => commands::history::run(json).await,
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
