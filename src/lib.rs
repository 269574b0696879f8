pub mod cli;
pub mod common;
pub mod parser;

#[cfg(feature = "http")]
pub mod server;
