pub mod dataset;
pub mod error;
pub mod history;
pub mod predict;

pub use dataset::{Dataset, PriceRecord};
pub use error::{Error, Result};
pub use history::{monthly_history, MonthlyAverage};
pub use predict::{predict_next_day, LinearTrend};
