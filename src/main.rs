use clap::Parser;
use cricket_registration_client::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Submit(args) => cli::submit::run(args).await,
        Command::ValidateFile(args) => cli::validate::run(args).await,
        Command::Keys { action } => cli::keys::run(action).await,
        Command::Teams(args) => cli::admin::teams(args).await,
        Command::Matches => cli::admin::matches().await,
    }
}
