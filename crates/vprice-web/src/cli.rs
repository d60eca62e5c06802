use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Sets the default level of logging; `RUST_LOG` takes precedence.
    #[arg(long, value_enum, default_value_t = TraceLevel::Info, global = true)]
    pub trace: TraceLevel,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the price API and the landing page.
    Serve {
        #[command(flatten)]
        data: DataArgs,

        #[arg(long, env = "VPRICE_HOST", default_value = "127.0.0.1")]
        host: String,

        #[arg(long, env = "VPRICE_PORT", default_value_t = 8080)]
        port: u16,

        /// Directory holding `index.html` and its assets.
        #[arg(long, env = "VPRICE_STATIC", default_value = "static")]
        static_dir: PathBuf,
    },

    /// Print every known vegetable.
    Vegetables {
        #[command(flatten)]
        data: DataArgs,
    },

    /// Print the predicted price for the day after the last recorded date.
    Predict {
        vegetable: String,

        #[command(flatten)]
        data: DataArgs,
    },

    /// Print monthly average prices.
    History {
        vegetable: String,

        #[command(flatten)]
        data: DataArgs,
    },
}

#[derive(Args, Debug)]
pub struct DataArgs {
    /// Price CSV with `Commodity`, `Date` and `Average` columns.
    #[arg(long, env = "VPRICE_DATA", default_value = "vprice.csv")]
    pub data: PathBuf,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum TraceLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl From<TraceLevel> for log::LevelFilter {
    fn from(level: TraceLevel) -> Self {
        match level {
            TraceLevel::Debug => log::LevelFilter::Debug,
            TraceLevel::Info => log::LevelFilter::Info,
            TraceLevel::Warn => log::LevelFilter::Warn,
            TraceLevel::Error => log::LevelFilter::Error,
        }
    }
}
