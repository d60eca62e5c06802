use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{}: missing required column `{column}`", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("{}, row {row}: invalid date `{value}`", path.display())]
    InvalidDate {
        path: PathBuf,
        row: usize,
        value: String,
    },

    #[error("{}, row {row}: invalid average price `{value}`", path.display())]
    InvalidAverage {
        path: PathBuf,
        row: usize,
        value: String,
    },

    /// No rows exist for the requested commodity.
    #[error("no price data found for `{0}`")]
    CommodityNotFound(String),

    /// The fitted trend produced something other than a finite price.
    #[error("price prediction for `{0}` is not a finite number")]
    Degenerate(String),
}
