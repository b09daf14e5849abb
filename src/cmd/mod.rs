use crate::{pkg::server::listen, prelude::Result, token};
use clap::{Parser, Subcommand};

mod migrate;

#[derive(Parser)]
#[command(about = "job board backend service")]
struct Cmd {
    #[command(subcommand)]
    command: Option<SubCommandType>,
}

#[derive(Subcommand)]
enum SubCommandType {
    Listen,
    Migrate,
    Token {
        #[arg(long)]
        username: String,
        #[arg(long, default_value_t = false)]
        admin: bool,
    },
}

pub async fn run() -> Result<()> {
    let args = Cmd::parse();
    match args.command {
        Some(SubCommandType::Listen) => {
            listen().await?;
        }
        Some(SubCommandType::Migrate) => {
            migrate::apply().await?;
        }
        Some(SubCommandType::Token { username, admin }) => {
            println!("{}", token::generate_token(&username, admin)?);
        }
        None => {
            tracing::error!("no subcommand passed");
        }
    }
    Ok(())
}
