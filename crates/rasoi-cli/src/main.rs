use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rasoi_infrastructure::{ConfigOverrides, ConfigService};

mod commands;
mod helper;

use commands::AppContext;

#[derive(Parser)]
#[command(name = "rasoi")]
#[command(about = "RasoiMitra ChefGuru - topping and add-on suggestions for your dishes", long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.config/rasoi/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL, e.g. http://localhost:8000
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Full URL of the suggestion endpoint; wins over --base-url
    #[arg(long, global = true)]
    prediction_url: Option<String>,

    /// Request timeout in seconds (at least 1)
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Language of the interface strings (en, hi)
    #[arg(long, global = true)]
    lang: Option<String>,

    /// Log at debug level to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Guided ChefGuru conversation (default)
    Chat,
    /// Ask for suggestions without the conversation
    Predict {
        /// Dish name, e.g. "Margherita Pizza"
        #[arg(long)]
        dish: String,
        /// Order date in YYYY-MM-DD format
        #[arg(long)]
        date: String,
        /// topping, addon or both
        #[arg(long, default_value = "both")]
        option: String,
        /// english or marathi
        #[arg(long, default_value = "english")]
        language: String,
        /// Print the raw response instead of the formatted text
        #[arg(long)]
        json: bool,
    },
    /// Show the most popular dishes
    Trends {
        /// Show only the top N dishes
        #[arg(long)]
        limit: Option<usize>,
    },
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.base_url.clone(),
            prediction_url: self.prediction_url.clone(),
            timeout_secs: self.timeout,
            language: self.lang.clone(),
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let service = match &cli.config {
        Some(path) => ConfigService::with_path(path.clone()),
        None => ConfigService::new(),
    };
    let config = service.load(&cli.overrides())?;
    let ctx = AppContext::new(config);

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => commands::chat::run(&ctx).await?,
        Commands::Predict {
            dish,
            date,
            option,
            language,
            json,
        } => {
            let inputs = commands::predict::PredictInputs {
                dish,
                date,
                option,
                language,
            };
            commands::predict::run(&ctx, &inputs, json).await?
        }
        Commands::Trends { limit } => commands::trends::run(&ctx, limit).await?,
    }

    Ok(())
}
