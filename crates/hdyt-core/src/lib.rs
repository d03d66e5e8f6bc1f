pub mod config;
pub mod logging;

pub mod backend;
pub mod catalog;
pub mod diagnose;
pub mod fetch;
pub mod jitter;
pub mod merge;
pub mod naming;
pub mod pipeline;
pub mod source;
pub mod stream;
pub mod tools;
