pub mod archive;
pub mod cli;
pub mod config;
pub mod errors;
pub mod extract;
pub mod log;
pub mod parse;
pub mod pipeline;
pub mod prompt;
pub mod provider;
pub mod sanitize;
pub mod ux;
