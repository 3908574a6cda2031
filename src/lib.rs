pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::LocalStorage, CliConfig};

#[cfg(feature = "lambda")]
pub use config::lambda::{LambdaConfig, S3Storage};

pub use adapters::{gee::GeeClient, map::LeafletMap};
pub use core::{dashboard::Dashboard, GenerateOutcome, GenerateRequest};
pub use utils::error::{DashError, Result};
