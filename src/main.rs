// main.rs
mod bond;
mod cli;
mod config;
mod content;
mod error;
mod navigation;
mod profile;
mod reading;
mod ritual;
mod sanctuary;
mod session;
mod shadow;
mod share;

use clap::Parser;
use cli::{Args, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    match args.command {
        None => cli::handle_session(args.data_dir, None, None).await,
        Some(Commands::Session { shadow, at }) => {
            cli::handle_session(args.data_dir, shadow, at).await
        }
        Some(Commands::Status) => cli::handle_status(args.data_dir).await,
        Some(Commands::Mood { mood }) => cli::handle_mood(mood, args.data_dir).await,
        Some(Commands::Ritual { hold_ms }) => cli::handle_ritual(hold_ms, args.data_dir).await,
        Some(Commands::History { limit }) => cli::handle_history(limit, args.data_dir).await,
        Some(Commands::Sanctuary { at }) => cli::handle_sanctuary(at, args.data_dir).await,
        Some(Commands::Bond { name1, name2 }) => {
            cli::handle_bond(name1, name2, args.data_dir).await
        }
        Some(Commands::Share) => cli::handle_share(args.data_dir).await,
        Some(Commands::Shadow { command }) => cli::handle_shadow(command, args.data_dir).await,
    }
}
