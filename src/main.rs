use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use ember::config::Config;
use ember::db::models::ActivityAttributes;
use ember::db::{SqliteStore, Store};
use ember::recommend::RecommendError;
use ember::vectorize::vectorize;

/// Ember: similarity-based date idea recommendations.
///
/// Record activities per user and ask for the ones most similar to a
/// favorite — ranked by cosine similarity over deterministic feature
/// vectors.
#[derive(Parser)]
#[command(name = "ember", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database
    Init,

    /// Run the HTTP API server
    Serve {
        /// Port to listen on (overrides EMBER_PORT)
        #[arg(long)]
        port: Option<u16>,

        /// Address to bind (overrides EMBER_BIND)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Register a new user
    Register {
        /// The username to register
        username: String,
    },

    /// Record a new activity for a user
    Add {
        /// Owner of the activity
        #[arg(long)]
        user_id: i64,

        /// Activity name (drives the feature vector)
        name: String,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long, default_value = "")]
        timeframe: String,

        #[arg(long, default_value = "")]
        mood: String,

        #[arg(long, default_value = "")]
        weather: String,

        #[arg(long, default_value = "")]
        category: String,
    },

    /// List a user's recorded activities
    List {
        #[arg(long)]
        user_id: i64,
    },

    /// Rank a user's other activities by similarity to one of them
    Recommend {
        #[arg(long)]
        user_id: i64,

        /// The reference activity
        #[arg(long)]
        activity_id: i64,

        /// Show at most this many results
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show system status (DB stats)
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("ember=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            info!("Initializing Ember database...");
            let config = Config::load()?;
            let store = init_store(&config)?;
            let table_count = store.table_count().await?;
            println!("Database initialized at: {}", config.db_path);
            println!("Tables created: {table_count}");
            println!("\nEmber is ready. Next steps:");
            println!("  ember register <username>");
            println!("  ember serve");
        }

        Commands::Serve { port, bind } => {
            let config = Config::load()?;
            let store = init_store(&config)?;
            let port = port.unwrap_or(config.port);
            let bind = bind.unwrap_or_else(|| config.bind.clone());
            ember::web::run_server(store, port, &bind).await?;
        }

        Commands::Register { username } => {
            let config = Config::load()?;
            let store = open_store(&config)?;

            let username = username.trim().to_string();
            if username.is_empty() {
                anyhow::bail!("Username must not be empty");
            }
            if store.get_user_by_username(&username).await?.is_some() {
                anyhow::bail!("Username '{username}' is already taken");
            }

            let user_id = store.create_user(&username).await?;
            println!("Registered {} (user id {user_id})", username.bold());
        }

        Commands::Add {
            user_id,
            name,
            description,
            timeframe,
            mood,
            weather,
            category,
        } => {
            let config = Config::load()?;
            let store = open_store(&config)?;

            if name.trim().is_empty() {
                anyhow::bail!("Activity name must not be empty");
            }
            if store.get_user(user_id).await?.is_none() {
                anyhow::bail!("No user with id {user_id}. Run `ember register` first.");
            }

            let attributes = ActivityAttributes {
                name,
                description,
                timeframe,
                mood,
                weather,
                category,
            };
            let vector = vectorize(&attributes);
            let activity_id = store.insert_activity(user_id, &attributes, &vector).await?;
            println!(
                "Added {} (activity id {activity_id})",
                attributes.name.bold()
            );
        }

        Commands::List { user_id } => {
            let config = Config::load()?;
            let store = open_store(&config)?;

            let activities = store.list_activities(user_id).await?;
            if activities.is_empty() {
                println!("No activities recorded for user {user_id} yet.");
                println!("  Run `ember add --user-id {user_id} <name>` to record one");
                return Ok(());
            }

            println!(
                "\n{}",
                format!("=== Activities for user {user_id} ({}) ===", activities.len()).bold()
            );
            for activity in &activities {
                let mut line = format!("  {:>4}. {}", activity.id, activity.attributes.name);
                if !activity.attributes.category.is_empty() {
                    line.push_str(&format!("  [{}]", activity.attributes.category));
                }
                println!("{line}");
                if !activity.attributes.description.is_empty() {
                    println!("        {}", activity.attributes.description.dimmed());
                }
            }
        }

        Commands::Recommend {
            user_id,
            activity_id,
            limit,
        } => {
            let config = Config::load()?;
            let store = open_store(&config)?;

            let reference = match store.get_activity(user_id, activity_id).await? {
                Some(activity) => activity,
                None => anyhow::bail!("Activity {activity_id} not found for user {user_id}"),
            };

            let recommendations = match ember::recommend::recommend(&store, user_id, activity_id)
                .await
            {
                Ok(list) => list,
                Err(e @ RecommendError::Store(_)) => return Err(e.into()),
                Err(e) => anyhow::bail!("{e}"),
            };

            if recommendations.is_empty() {
                println!(
                    "No other activities to compare against {}.",
                    reference.attributes.name.bold()
                );
                return Ok(());
            }

            println!(
                "\n{}",
                format!("=== Similar to \"{}\" ===", reference.attributes.name).bold()
            );
            println!(
                "  {:>4}  {:<32} {:>10}",
                "Id".dimmed(),
                "Name".dimmed(),
                "Similarity".dimmed()
            );
            let shown = limit.unwrap_or(recommendations.len());
            for recommendation in recommendations.iter().take(shown) {
                println!(
                    "  {:>4}  {:<32} {:>10.4}",
                    recommendation.activity.id,
                    recommendation.activity.attributes.name,
                    recommendation.similarity
                );
            }
        }

        Commands::Status => {
            let config = Config::load()?;
            if !std::path::Path::new(&config.db_path).exists() {
                println!("Database: not initialized");
                println!("\nRun `ember init` to set up the database.");
                return Ok(());
            }
            let store = open_store(&config)?;
            ember::status::show(&store, &config.db_path).await?;
        }
    }

    Ok(())
}

/// Open the database, creating it and its tables if needed.
fn init_store(config: &Config) -> Result<Arc<dyn Store>> {
    let conn = ember::db::initialize(&config.db_path)?;
    Ok(Arc::new(SqliteStore::new(conn)))
}

/// Open an existing database (directs the user to `ember init` if missing).
fn open_store(config: &Config) -> Result<Arc<dyn Store>> {
    let conn = ember::db::open(&config.db_path)?;
    Ok(Arc::new(SqliteStore::new(conn)))
}
