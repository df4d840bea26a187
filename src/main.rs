use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use foodgram::cli;

/// foodgram - recipes, subscriptions and shopping lists
#[derive(Parser)]
#[command(name = "foodgram")]
#[command(about = "Recipe sharing backend with shopping list export", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
    /// Manage the ingredient catalog
    Ingredients {
        #[command(subcommand)]
        command: IngredientsCommands,
    },
    /// Manage recipe tags
    Tag {
        #[command(subcommand)]
        command: TagCommands,
    },
    /// Manage user accounts
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
}

#[derive(Subcommand)]
enum IngredientsCommands {
    /// Replace every ingredient with the content of a CSV or JSON file
    Load { file: PathBuf },
}

#[derive(Subcommand)]
enum TagCommands {
    /// Create a tag
    Create {
        #[arg(long)]
        name: String,

        /// Hex color, e.g. #E26C2D
        #[arg(long)]
        color: String,

        #[arg(long)]
        slug: String,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    /// Grant staff permissions
    Staff {
        #[arg(long)]
        email: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = foodgram::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    foodgram::observability::init_observability(
        "foodgram",
        &config.observability.log_level,
        config.observability.json,
    )?;

    match cli.command {
        Commands::Serve { host, port } => cli::serve(config, host, port).await,
        Commands::Migrate => cli::migrate(&config).await,
        Commands::Reset => cli::reset(&config).await,
        Commands::Ingredients {
            command: IngredientsCommands::Load { file },
        } => cli::load_ingredients(config, &file).await,
        Commands::Tag {
            command: TagCommands::Create { name, color, slug },
        } => {
            cli::create_tag(
                config,
                foodgram_recipe::catalog::TagInput { name, color, slug },
            )
            .await
        }
        Commands::User {
            command: UserCommands::Staff { email },
        } => cli::make_staff(config, email).await,
    }
}
