//! Gateway configuration
//!
//! Layered with the `config` crate: built-in defaults, an optional TOML file,
//! `AQUACRED_`-prefixed environment variables, then the legacy variable names
//! used by earlier deployments of the registry frontend.

use ::config::{builder::DefaultState, ConfigBuilder, Environment, FileFormat, Source};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::common::{Error, Result};
use crate::explorer::ExplorerLink;

/// Config file read when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "aquacred.toml";

/// Default explorer template; `{hash}` is replaced by the transaction hash
pub const DEFAULT_EXPLORER_TX_URL: &str = "https://sepolia.etherscan.io/tx/{hash}";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub chain: ChainConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Network label reported by `/health`
    pub network: String,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    pub rpc_url: Option<String>,
    pub private_key: Option<String>,
    pub contract_address: Option<String>,
    /// Blocks to wait for before a registration counts as confirmed
    pub confirmations: usize,
    pub explorer_tx_url: String,
}

/// Read-only provider used by the dashboard. When unset the dashboard renders
/// empty, the same as a browser without an injected wallet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub provider_url: Option<String>,
}

impl fmt::Debug for ChainConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainConfig")
            .field("rpc_url", &self.rpc_url)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("contract_address", &self.contract_address)
            .field("confirmations", &self.confirmations)
            .field("explorer_tx_url", &self.explorer_tx_url)
            .finish()
    }
}

impl ChainConfig {
    pub fn explorer(&self) -> ExplorerLink {
        ExplorerLink::new(&self.explorer_tx_url)
    }
}

/// Variable names used by earlier deployments of the registry frontend
#[derive(Debug, Clone, Default)]
pub struct LegacyEnv {
    pub rpc_url: Option<String>,
    pub private_key: Option<String>,
    pub contract_address: Option<String>,
    pub provider_url: Option<String>,
}

impl LegacyEnv {
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Self {
            rpc_url: var("SEPOLIA_RPC_URL"),
            private_key: var("OWNER_PRIVATE_KEY"),
            contract_address: var("NEXT_PUBLIC_CONTRACT_ADDRESS"),
            provider_url: var("DASHBOARD_PROVIDER_URL"),
        }
    }
}

impl Settings {
    /// Load settings from `path` (or `aquacred.toml` if present) and the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = ::config::File::from(path.unwrap_or(Path::new(DEFAULT_CONFIG_FILE)))
            .format(FileFormat::Toml)
            .required(path.is_some());
        Self::build(
            file,
            Environment::with_prefix("AQUACRED")
                .prefix_separator("_")
                .separator("__"),
            LegacyEnv::from_env(),
        )
    }

    /// Parse settings from an in-memory TOML document, ignoring the process environment.
    pub fn from_toml(contents: &str) -> Result<Self> {
        Self::build(
            ::config::File::from_str(contents, FileFormat::Toml),
            Environment::with_prefix("AQUACRED")
                .prefix_separator("_")
                .separator("__")
                .source(Some(Default::default())),
            LegacyEnv::default(),
        )
    }

    pub(crate) fn build<F, E>(file: F, env: E, legacy: LegacyEnv) -> Result<Self>
    where
        F: Source + Send + Sync + 'static,
        E: Source + Send + Sync + 'static,
    {
        let settings = defaults()?
            .add_source(file)
            .add_source(env)
            .set_override_option("chain.rpc_url", legacy.rpc_url)?
            .set_override_option("chain.private_key", legacy.private_key)?
            .set_override_option("chain.contract_address", legacy.contract_address)?
            .set_override_option("dashboard.provider_url", legacy.provider_url)?
            .build()?;

        settings.try_deserialize().map_err(Error::from)
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>> {
    Ok(::config::Config::builder()
        .set_default("server.listen_addr", "0.0.0.0:3000")?
        .set_default("server.network", "sepolia")?
        .set_default("chain.confirmations", 1)?
        .set_default("chain.explorer_tx_url", DEFAULT_EXPLORER_TX_URL)?)
}
