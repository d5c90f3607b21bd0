//! Core module containing the task supervision machinery
//!
//! This module contains:
//! - The closed task status set shared with the store
//! - The worker launcher seam and its process-backed implementation
//! - The supervisor racing worker exit, store polls and cancellation

mod supervisor;
mod task_status;
mod worker;

pub use supervisor::*;
pub use task_status::*;
pub use worker::*;
