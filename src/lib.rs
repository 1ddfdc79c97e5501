pub mod ast;
pub mod cli;
pub mod codec;
pub mod compare;
pub mod config;
pub mod error;
pub mod exit;
pub mod parse;
pub mod report;
pub mod source;
pub mod store;
