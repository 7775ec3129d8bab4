pub mod analyzers;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod processors;
pub mod readers;
pub mod render;
pub mod session;
pub mod utils;

pub use error::{ProcessingError, Result};
