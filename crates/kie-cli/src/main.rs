use clap::{Parser, Subcommand};

mod commands;
mod settings;

use settings::{CommonArgs, StateArgs};

#[derive(Parser)]
#[command(
    name = "kie-swarm",
    about = "KIE server bootstrap — credentials and local kjar deployment state",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Provision the users/roles credential files and print the security
    /// domain the server should be configured with.
    Bootstrap {
        /// Read the credential files from this directory instead of the
        /// bundled copies.
        #[arg(long)]
        resources_dir: Option<String>,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Register kjars (group:artifact:version) as started containers in the
    /// server's local deployment state.
    ///
    /// Does nothing when a controller is configured: the controller owns
    /// deployment state in that mode.
    Install {
        #[command(flatten)]
        state: StateArgs,
        /// Kjar coordinates, e.g. org.acme:rules:1.0
        #[arg(value_name = "GAV")]
        kjars: Vec<String>,
    },
    /// Run the full startup sequence: provision credentials (best effort),
    /// then install the given kjars.
    Launch {
        #[command(flatten)]
        state: StateArgs,
        #[arg(long)]
        resources_dir: Option<String>,
        #[arg(value_name = "GAV")]
        kjars: Vec<String>,
    },
    /// Inspect persisted deployment state.
    State {
        #[command(subcommand)]
        action: StateAction,
    },
}

#[derive(Subcommand)]
enum StateAction {
    /// Print the stored record for the configured server id as JSON
    Show {
        #[command(flatten)]
        state: StateArgs,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.common.load()?;

    match cli.command {
        Commands::Bootstrap { resources_dir, format } => {
            let config = settings::with_resources_dir(config, resources_dir);
            commands::bootstrap::bootstrap(&config, &format)
        }
        Commands::Install { state, kjars } => {
            commands::install::install(&state.apply(config)?, &kjars)
        }
        Commands::Launch {
            state,
            resources_dir,
            kjars,
        } => {
            let config = settings::with_resources_dir(state.apply(config)?, resources_dir);
            commands::launch::launch(&config, &kjars)
        }
        Commands::State { action } => match action {
            StateAction::Show { state } => commands::state::show(&state.apply(config)?),
        },
    }
}
