use anyhow::Context;
use clap::{Parser, Subcommand};
use readinglist_kernel::settings::{Environment, Settings};

#[derive(Debug, Parser)]
#[command(name = "readinglist", version, about = "Reading list HTTP API")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve(Overrides),
    /// Print the resolved configuration
    Config(Overrides),
}

#[derive(Debug, clap::Args)]
struct Overrides {
    /// API server port
    #[arg(long)]
    port: Option<u16>,
    /// Environment (development|test|staging|production)
    #[arg(long)]
    env: Option<Environment>,
}

impl Overrides {
    fn apply(&self, settings: &mut Settings) {
        if let Some(port) = self.port {
            settings.server.port = port;
        }
        if let Some(env) = self.env {
            settings.environment = env;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load readinglist settings")?;

    match cli.command {
        Command::Serve(overrides) => {
            overrides.apply(&mut settings);
            readinglist_app::run(settings).await
        }
        Command::Config(overrides) => {
            overrides.apply(&mut settings);
            println!("{settings:#?}");
            Ok(())
        }
    }
}
