//! raigate command-line front end
//!
//! Settings resolution, pipeline assembly, the console demo and the HTTP
//! service behind the `raigate` binary.

pub mod app;
pub mod cli;
pub mod demo;
pub mod server;
pub mod settings;

pub use app::{build_pipeline, AppState};
pub use cli::{AzureArgs, Cli, Commands};
pub use server::create_router;
pub use settings::Settings;
