use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;

/// weeklist - shopping lists from a weekly menu
#[derive(Parser)]
#[command(name = "weeklist")]
#[command(about = "Turns a weekly menu into a shopping list for the days you cook", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a menu as a shopping list
    Import(cli::week::ImportArgs),
    /// Show the items no recipe day could be matched to
    Unmapped {
        /// Menu week number (defaults to the latest menu)
        #[arg(long)]
        week: Option<u32>,
    },
    /// Print the comparison key of each ingredient
    Normalize {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Menus available in the menu directory
    Menus,
    /// Stored lists, newest first
    List,
    /// Mark an item bought, or pending again
    Toggle {
        week_id: String,
        item: String,

        /// The item belongs to the veggie list
        #[arg(long)]
        veggie: bool,
    },
    /// Mark every item of a list pending
    Reset { week_id: String },
    /// Delete a stored list
    Delete { week_id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = weeklist::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    weeklist::observability::init_observability(
        env!("CARGO_PKG_VERSION"),
        &config.observability,
    )?;

    match cli.command {
        Commands::Import(args) => cli::week::import(config, args).await,
        Commands::Unmapped { week } => cli::menu::unmapped(config, week).await,
        Commands::Normalize { text } => {
            cli::menu::normalize(&config, &text);
            Ok(())
        }
        Commands::Menus => cli::menu::menus(config).await,
        Commands::List => cli::week::list(config).await,
        Commands::Toggle {
            week_id,
            item,
            veggie,
        } => cli::week::toggle(config, week_id, item, veggie).await,
        Commands::Reset { week_id } => cli::week::reset(config, week_id).await,
        Commands::Delete { week_id } => cli::week::delete(config, week_id).await,
    }
}
