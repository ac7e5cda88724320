//! Registry contract boundary
//!
//! The `AquaCredRegistry` contract is external and immutable. The gateway
//! only talks to it through the two traits below, so HTTP handlers and the
//! dashboard can run against the ethers-backed implementation in production
//! and against in-memory doubles in tests.

pub mod ethers_registry;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::common::Result;

pub use ethers_registry::{EthersReader, EthersRegistrar};

/// Arguments of `registerProject`, in ABI order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterProject {
    pub project_name: String,
    pub location: String,
    pub implementing_body: String,
    pub area_hectares: u64,
    /// Seconds since the Unix epoch
    pub start_date: u64,
    pub project_type: String,
}

/// Outcome of a confirmed `registerProject` transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub transaction_hash: String,
    /// Id from the `ProjectRegistered` event, when the receipt carried one
    pub project_id: Option<u64>,
}

/// A project as stored by the contract, narrowed to native integer types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: u64,
    pub name: String,
    pub location: String,
    pub implementing_body: String,
    pub area_hectares: u64,
    pub start_date: u64,
    pub project_type: String,
    pub is_initialized: bool,
}

/// State-mutating side of the registry
#[async_trait]
pub trait ProjectRegistrar: Send + Sync {
    /// Sign and broadcast `registerProject`, returning once the transaction is confirmed.
    async fn register_project(&self, call: &RegisterProject) -> Result<Registration>;
}

/// Read-only side of the registry
#[async_trait]
pub trait RegistryReader: Send + Sync {
    /// `getProjectCount()`
    async fn project_count(&self) -> Result<u64>;

    /// `getProject(id)`
    async fn project(&self, id: u64) -> Result<ProjectRecord>;

    /// `projectCounter()` storage accessor
    async fn project_counter(&self) -> Result<u64>;

    /// `projects(id)` storage accessor
    async fn stored_project(&self, id: u64) -> Result<ProjectRecord>;
}
