//! taskherd tracks units of work in a local SQLite store and supervises the
//! external worker process that executes each one.
//!
//! The worker is launched with the task id in its environment and is itself
//! responsible for marking the task completed or failed through the store;
//! the supervisor races the worker's exit against store-observed status
//! changes and operator cancellation, terminates the worker gracefully when
//! the store has the last word, and reconciles the final status.

pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod core;
pub mod db;
pub mod errors;
pub mod project;
pub mod schema;
pub mod utils;
