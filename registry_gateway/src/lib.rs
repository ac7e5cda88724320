//! AquaCred registry gateway
//!
//! A thin web front for the `AquaCredRegistry` contract: an upload form that
//! submits projects as signed transactions, and a dashboard that reads them
//! back through read-only contract calls.

pub mod api;
pub mod common;
pub mod config;
pub mod contract;
pub mod dashboard;
pub mod explorer;
pub mod submission;
pub mod upload;

pub use common::{Error, Result};
