use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use taskdeck_core::{BoardView, TaskFilter};
use taskdeck_store::{RemoteTaskStore, TaskStore};

mod board_tui;
mod characters_cmd;
mod config;
mod logging;
mod state;

#[derive(Parser, Debug)]
#[command(name = "taskdeck", version, about = "Terminal task board backed by a remote REST store")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the interactive task board
    Board,

    /// Search the character API by name and print matching cards
    Characters {
        /// Name to search for (substring match)
        name: Vec<String>,
    },

    /// Print tasks without entering the board
    List {
        /// all | active | completed
        #[arg(long, default_value = "all")]
        filter: String,
    },

    /// Write the default config to ~/.taskdeck/config.toml
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config()?;
    let _guard = logging::init_logging("info");

    match cli.command {
        Command::Board => {
            board_tui::run_board(&cfg)?;
        }
        Command::Characters { name } => {
            characters_cmd::run(&cfg, &name.join(" ")).await?;
        }
        Command::List { filter } => {
            list_tasks(&cfg, &filter).await?;
        }
        Command::Init => {
            config::init_config()?;
        }
    }

    Ok(())
}

async fn list_tasks(cfg: &config::Config, filter: &str) -> Result<()> {
    let filter: TaskFilter = filter.parse()?;
    let tz = taskdeck_core::parse_tz(&cfg.ui.timezone)?;

    let store = RemoteTaskStore::new(reqwest::Client::new(), cfg.api.task_store_url.clone());
    let tasks = store.list().await?;

    match taskdeck_core::project(&tasks, filter, Utc::now(), tz) {
        BoardView::Empty(text) => println!("{text}"),
        BoardView::Rows(rows) => {
            for r in &rows {
                let check = if r.completed { "x" } else { " " };
                println!(
                    "[{check}] {} | {} | {}",
                    r.title, r.priority_label, r.created_label
                );
                if let Some(desc) = &r.description {
                    println!("    {desc}");
                }
            }
        }
    }

    Ok(())
}
