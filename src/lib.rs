pub mod classify;
pub mod client;
pub mod endpoint;
pub mod error;
pub mod extract;
pub mod scaffold;

pub use client::{AocClient, FetchConfig, FetchConfigBuilder};
pub use error::{ExtractError, FetchError};
pub use extract::DayRecord;
