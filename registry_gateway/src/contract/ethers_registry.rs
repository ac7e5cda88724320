//! ethers-rs implementation of the registry traits
//!
//! Bindings are generated from the deployed contract's ABI. Writes build a
//! fresh signing client per call from the server-held credentials, so a bad
//! key or unreachable RPC fails that request only.

use async_trait::async_trait;
use ethers::abi::RawLog;
use ethers::contract::{abigen, ContractError, EthLogDecode};
use ethers::prelude::*;
use ethers::types::{Address, TransactionReceipt, U256, U64};
use std::convert::TryFrom;
use std::sync::Arc;

use super::{ProjectRecord, ProjectRegistrar, RegisterProject, Registration, RegistryReader};
use crate::common::{Error, Result};
use crate::config::ChainConfig;

abigen!(AquaCredRegistry, "abi/AquaCredRegistry.json");

/// Signs and submits `registerProject` transactions
pub struct EthersRegistrar {
    chain: ChainConfig,
}

impl EthersRegistrar {
    pub fn new(chain: ChainConfig) -> Self {
        Self { chain }
    }
}

#[async_trait]
impl ProjectRegistrar for EthersRegistrar {
    async fn register_project(&self, call: &RegisterProject) -> Result<Registration> {
        let rpc_url = self
            .chain
            .rpc_url
            .as_deref()
            .ok_or(Error::NotConfigured("chain.rpc_url"))?;
        let private_key = self
            .chain
            .private_key
            .as_deref()
            .ok_or(Error::NotConfigured("chain.private_key"))?;
        let contract_address = parse_contract_address(self.chain.contract_address.as_deref())?;

        let provider = http_provider(rpc_url)?;
        let chain_id = provider
            .get_chainid()
            .await
            .map_err(|e| Error::Provider(format!("Failed to get chain ID: {}", e)))?
            .as_u64();

        let wallet = private_key
            .parse::<LocalWallet>()
            .map_err(|e| Error::Provider(format!("Invalid private key: {}", e)))?
            .with_chain_id(chain_id);
        let client = Arc::new(SignerMiddleware::new(provider, wallet));
        let contract = AquaCredRegistry::new(contract_address, client);

        let tx = contract.register_project(
            call.project_name.clone(),
            call.location.clone(),
            call.implementing_body.clone(),
            U256::from(call.area_hectares),
            U256::from(call.start_date),
            call.project_type.clone(),
        );

        let pending_tx = tx.send().await.map_err(contract_error)?;
        let tx_hash = format!("{:?}", pending_tx.tx_hash());
        log::info!("registerProject transaction sent: {}", tx_hash);

        let receipt = pending_tx
            .confirmations(self.chain.confirmations)
            .await
            .map_err(|e| Error::Provider(format!("Failed to get confirmation: {}", e)))?;

        confirmed(tx_hash, receipt, contract_address)
    }
}

/// Turn the awaited receipt into a registration. No receipt means the
/// transaction was dropped; any status other than 1 is a revert.
fn confirmed(
    tx_hash: String,
    receipt: Option<TransactionReceipt>,
    contract: Address,
) -> Result<Registration> {
    let receipt = receipt.ok_or_else(|| Error::Dropped(tx_hash.clone()))?;
    if receipt.status != Some(U64::from(1)) {
        return Err(Error::Reverted(tx_hash));
    }

    Ok(Registration {
        project_id: registered_project_id(&receipt, contract),
        transaction_hash: tx_hash,
    })
}

/// Read-only registry client over a plain HTTP provider
pub struct EthersReader {
    contract: AquaCredRegistry<Provider<Http>>,
}

impl EthersReader {
    pub fn connect(provider_url: &str, contract_address: Option<&str>) -> Result<Self> {
        let provider = http_provider(provider_url)?;
        let address = parse_contract_address(contract_address)?;
        Ok(Self {
            contract: AquaCredRegistry::new(address, Arc::new(provider)),
        })
    }
}

#[async_trait]
impl RegistryReader for EthersReader {
    async fn project_count(&self) -> Result<u64> {
        let count = self
            .contract
            .get_project_count()
            .call()
            .await
            .map_err(contract_error)?;
        narrow(count).ok_or_else(|| Error::Contract(format!("Project count {} exceeds u64", count)))
    }

    async fn project(&self, id: u64) -> Result<ProjectRecord> {
        let project = self
            .contract
            .get_project(U256::from(id))
            .call()
            .await
            .map_err(contract_error)?;
        ProjectRecord::try_from(project)
    }

    async fn project_counter(&self) -> Result<u64> {
        let counter = self
            .contract
            .project_counter()
            .call()
            .await
            .map_err(contract_error)?;
        narrow(counter)
            .ok_or_else(|| Error::Contract(format!("Project counter {} exceeds u64", counter)))
    }

    async fn stored_project(&self, id: u64) -> Result<ProjectRecord> {
        let (
            project_id,
            project_name,
            location,
            implementing_body,
            area_hectares,
            start_date,
            project_type,
            is_initialized,
        ) = self
            .contract
            .projects(U256::from(id))
            .call()
            .await
            .map_err(contract_error)?;

        ProjectRecord::try_from(Project {
            project_id,
            project_name,
            location,
            implementing_body,
            area_hectares,
            start_date,
            project_type,
            is_initialized,
        })
    }
}

impl TryFrom<Project> for ProjectRecord {
    type Error = Error;

    fn try_from(project: Project) -> Result<Self> {
        let id = narrow(project.project_id).ok_or_else(|| Error::MalformedRecord {
            id: u64::MAX,
            reason: format!("projectId {} exceeds u64", project.project_id),
        })?;
        let field = |name: &str, value: U256| {
            narrow(value).ok_or_else(|| Error::MalformedRecord {
                id,
                reason: format!("{} {} exceeds u64", name, value),
            })
        };

        Ok(Self {
            id,
            area_hectares: field("areaHectares", project.area_hectares)?,
            start_date: field("startDate", project.start_date)?,
            name: project.project_name,
            location: project.location,
            implementing_body: project.implementing_body,
            project_type: project.project_type,
            is_initialized: project.is_initialized,
        })
    }
}

fn http_provider(url: &str) -> Result<Provider<Http>> {
    Provider::<Http>::try_from(url)
        .map_err(|e| Error::Provider(format!("Failed to create HTTP provider: {}", e)))
}

fn parse_contract_address(address: Option<&str>) -> Result<Address> {
    address
        .ok_or(Error::NotConfigured("chain.contract_address"))?
        .parse::<Address>()
        .map_err(|e| Error::Provider(format!("Invalid contract address: {}", e)))
}

/// Revert reasons are relayed as-is; anything else keeps the ethers message.
fn contract_error<M: Middleware>(err: ContractError<M>) -> Error {
    match err.decode_revert::<String>() {
        Some(reason) => Error::Contract(reason),
        None => Error::Contract(err.to_string()),
    }
}

fn narrow(value: U256) -> Option<u64> {
    if value.bits() > 64 {
        None
    } else {
        Some(value.as_u64())
    }
}

fn registered_project_id(receipt: &TransactionReceipt, contract: Address) -> Option<u64> {
    receipt
        .logs
        .iter()
        .filter(|log| log.address == contract)
        .find_map(|log| {
            let raw = RawLog {
                topics: log.topics.clone(),
                data: log.data.to_vec(),
            };
            <ProjectRegisteredFilter as EthLogDecode>::decode_log(&raw).ok()
        })
        .and_then(|event| narrow(event.project_id))
}
