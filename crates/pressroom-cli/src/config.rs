use clap::{Parser, Subcommand};

use crate::commands::{author::AuthorCmd, publication::PublicationCmd};

#[derive(Parser)]
#[command(
    version,
    about,
    long_about = "CLI for pressroom - manage authors and publications through the editorial services."
)]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    Author(AuthorCmd),
    Publication(PublicationCmd),
}

impl crate::commands::Executor for Command {
    async fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Author(cmd) => cmd.run().await,
            Command::Publication(cmd) => cmd.run().await,
        }
    }
}
