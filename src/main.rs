use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use foodgram::{AppState, Config};
use foodgram_recipe::TagInput;
use foodgram_shared::Identity;
use foodgram_shopping::ShoppingList;

/// foodgram - recipes, favorites and shopping lists
#[derive(Parser)]
#[command(name = "foodgram")]
#[command(about = "Recipe sharing backend maintenance tool", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
    /// Load a name,measurement_unit CSV file into the ingredient catalog
    ImportIngredients {
        path: PathBuf,
    },
    /// Create a recipe tag
    CreateTag {
        #[arg(long)]
        name: String,
        #[arg(long)]
        slug: String,
    },
    /// Render a user's shopping list to a PDF file
    ShoppingList {
        #[arg(long)]
        user: String,
        #[arg(long)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    foodgram::observability::init_observability(
        "foodgram",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Migrate => foodgram::migrate::migrate(&config).await,
        Commands::Reset => foodgram::migrate::reset(&config).await,
        Commands::ImportIngredients { path } => import_ingredients_command(config, path).await,
        Commands::CreateTag { name, slug } => create_tag_command(config, name, slug).await,
        Commands::ShoppingList { user, output } => {
            shopping_list_command(config, user, output).await
        }
    }
}

#[tracing::instrument(skip(config))]
async fn import_ingredients_command(config: Config, path: PathBuf) -> Result<()> {
    let app = AppState::connect(config).await?;
    let report = app.ingredient_command().import_csv(&path).await?;

    tracing::info!(
        inserted = report.inserted,
        skipped = report.skipped,
        "Ingredients imported"
    );

    Ok(())
}

#[tracing::instrument(skip(config))]
async fn create_tag_command(config: Config, name: String, slug: String) -> Result<()> {
    let app = AppState::connect(config).await?;
    let id = app
        .recipe_command()
        .create_tag(TagInput { name, slug })
        .await?;

    tracing::info!(tag_id = id, "Tag created");

    Ok(())
}

#[tracing::instrument(skip(config))]
async fn shopping_list_command(config: Config, user: String, output: PathBuf) -> Result<()> {
    let app = AppState::connect(config).await?;

    match app
        .shopping_query()
        .shopping_list(&Identity::user(user))
        .await?
    {
        ShoppingList::Empty => {
            tracing::info!("{}", foodgram::export::EMPTY_CART_DETAIL);
        }
        ShoppingList::Ready { lines, document } => {
            tokio::fs::write(&output, document).await?;
            tracing::info!(lines = lines.len(), output = %output.display(), "Shopping list written");
        }
    }

    Ok(())
}
