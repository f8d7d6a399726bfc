pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod events;
pub mod logging;
pub mod models;
pub mod output;
pub mod report;
pub mod sampling;
pub mod state;
pub mod stats;
