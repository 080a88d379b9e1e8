pub mod api_connection;
pub mod cli;
pub mod config;
pub mod favorites;
pub mod logging;
pub mod preferences;
pub mod shell;
pub mod storage;
pub mod views;
