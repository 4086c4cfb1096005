pub mod config;
pub mod expansion;
pub mod types;
pub mod validation;

pub use config::{Command, OutputFormat, OutputOptions, Parameters};
pub use expansion::*;
pub use types::*;
pub use validation::*;
