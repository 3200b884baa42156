pub mod apis;
pub mod app;
pub mod common;
pub mod config;
pub mod infra;
pub mod logging;
pub mod parser;
pub mod persist;
pub mod pipeline;
pub mod report;
pub mod storage;
