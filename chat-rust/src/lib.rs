mod client_utils;
pub mod config;
mod errors;
pub mod openai;
mod run;
pub mod telemetry;

pub use config::ChatConfig;
pub use errors::*;
pub use run::run;
