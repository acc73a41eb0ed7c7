pub mod cli;
pub mod cmd_log;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod file_watcher;
pub mod process;
pub mod refresh;
pub mod status;

pub use error::Error;

pub const APP_NAME: &str = "stagehand";

pub type Res<T> = Result<T, Error>;
