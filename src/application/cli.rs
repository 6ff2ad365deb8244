use crate::application::{API_KEY_VAR, Config, ExplorerApp, THEME_VAR};
use crate::infrastructure::logging;
use chrono::Local;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "nasa-explorer")]
#[command(about = "Browse NASA's Astronomy Picture of the Day and Mars rover photos")]
#[command(version)]
pub struct Cli {
    /// NASA API key (overrides NASA_API_KEY)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Colour theme: dark, light or minimal (overrides NASA_EXPLORER_THEME)
    #[arg(long, global = true)]
    pub theme: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive explorer (default)
    Tui,
    /// Print the Astronomy Picture of the Day
    Apod {
        /// Specific date (YYYY-MM-DD format, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Print Mars rover photos taken on a day
    Rover {
        /// Earth date (YYYY-MM-DD format, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Rover name, defaults to NASA_ROVER or curiosity
        #[arg(short, long)]
        rover: Option<String>,
    },
}

impl Cli {
    pub fn run() -> anyhow::Result<()> {
        let cli = Self::parse();
        let config = cli.config()?;

        let log_path = logging::init(&config.log_dir)?;
        tracing::debug!(path = %log_path.display(), "logging initialised");

        let app = ExplorerApp::new(config)?;

        match cli.command {
            Some(Commands::Apod { date }) => {
                app.print_daily_picture(date.as_deref())?;
            }
            Some(Commands::Rover { date, rover }) => {
                let earth_date =
                    date.unwrap_or_else(|| Local::now().date_naive().format("%Y-%m-%d").to_string());
                app.print_rover_photos(&earth_date, rover.as_deref())?;
            }
            Some(Commands::Tui) | None => {
                app.run_tui()?;
            }
        }

        Ok(())
    }

    /// Environment configuration with command line flags taking precedence
    pub fn config(&self) -> anyhow::Result<Config> {
        let overrides = [(API_KEY_VAR, &self.api_key), (THEME_VAR, &self.theme)];

        let config = Config::from_lookup(|name| {
            overrides
                .iter()
                .find(|(var, _)| *var == name)
                .and_then(|(_, value)| (*value).clone())
                .or_else(|| std::env::var(name).ok())
        })?;
        Ok(config)
    }
}
