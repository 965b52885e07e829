mod commands;
pub mod core;
mod help;
mod io;
pub mod output;
mod registry;
mod render;
mod shell;

pub use shell::{run_cli, SCRIPT_ENV};
