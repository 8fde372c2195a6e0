pub mod cli;
pub mod load_config;

pub use cli::{init_tracing, run, Cli};
