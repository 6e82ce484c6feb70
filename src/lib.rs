pub mod config;
pub mod encounters;
pub mod error;
pub mod export;
pub mod filter;
pub mod hosting;
pub mod loader;
pub mod matches;
pub mod orientation;
pub mod report;
pub mod series;
pub mod store;
pub mod summary;

pub use error::{StatsError, StatsResult};
pub use matches::MatchRecord;
