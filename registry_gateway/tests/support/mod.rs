#![allow(dead_code)]

use aquacred_gateway::api::AppState;
use aquacred_gateway::common::{Error, Result};
use aquacred_gateway::contract::{
    ProjectRecord, ProjectRegistrar, RegisterProject, Registration, RegistryReader,
};
use aquacred_gateway::explorer::ExplorerLink;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Records every `registerProject` call and answers with a fixed outcome
pub struct MockRegistrar {
    pub calls: Mutex<Vec<RegisterProject>>,
    outcome: std::result::Result<Registration, String>,
}

impl MockRegistrar {
    pub fn confirming(tx_hash: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            outcome: Ok(Registration {
                transaction_hash: tx_hash.to_string(),
                project_id: None,
            }),
        })
    }

    pub fn reverting(message: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            outcome: Err(message.to_string()),
        })
    }

    pub fn calls(&self) -> Vec<RegisterProject> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProjectRegistrar for MockRegistrar {
    async fn register_project(&self, call: &RegisterProject) -> Result<Registration> {
        self.calls.lock().unwrap().push(call.clone());
        self.outcome.clone().map_err(Error::Contract)
    }
}

/// In-memory registry; ids listed in `failing` error when fetched
pub struct MockReader {
    count: u64,
    records: HashMap<u64, ProjectRecord>,
    failing: Vec<u64>,
    pub fetched: Mutex<Vec<u64>>,
}

impl MockReader {
    pub fn with_records(records: Vec<ProjectRecord>) -> Self {
        Self {
            count: records.len() as u64,
            records: records.into_iter().map(|r| (r.id, r)).collect(),
            failing: Vec::new(),
            fetched: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_on(mut self, id: u64) -> Self {
        self.failing.push(id);
        self
    }

    pub fn fetched(&self) -> Vec<u64> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl RegistryReader for MockReader {
    async fn project_count(&self) -> Result<u64> {
        Ok(self.count)
    }

    async fn project(&self, id: u64) -> Result<ProjectRecord> {
        self.fetched.lock().unwrap().push(id);
        if self.failing.contains(&id) {
            return Err(Error::Provider("connection reset".to_string()));
        }
        self.records
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::Contract("Project does not exist".to_string()))
    }

    async fn project_counter(&self) -> Result<u64> {
        Ok(self.count)
    }

    async fn stored_project(&self, id: u64) -> Result<ProjectRecord> {
        self.project(id).await
    }
}

pub fn record(id: u64, name: &str, location: &str, hectares: u64) -> ProjectRecord {
    ProjectRecord {
        id,
        name: name.to_string(),
        location: location.to_string(),
        implementing_body: "State Forest Department".to_string(),
        area_hectares: hectares,
        start_date: 1_704_067_200,
        project_type: "Mangrove Afforestation".to_string(),
        is_initialized: true,
    }
}

pub fn app_state(
    registrar: Arc<dyn ProjectRegistrar>,
    reader: Option<Arc<dyn RegistryReader>>,
) -> AppState {
    AppState {
        registrar,
        reader,
        explorer: ExplorerLink::default(),
        network: "sepolia".to_string(),
    }
}

pub const BOUNDARY: &str = "aquacred-test-boundary";

/// Hand-built multipart/form-data body
pub fn multipart_body(fields: &[(&str, &str)]) -> Vec<u8> {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
            BOUNDARY, name, value
        ));
    }
    body.push_str(&format!("--{}--\r\n", BOUNDARY));
    body.into_bytes()
}

pub fn complete_form() -> Vec<(&'static str, &'static str)> {
    vec![
        ("projectName", "Sundarbans Restoration"),
        ("location", "West Bengal"),
        ("implementingBody", "Forest Department"),
        ("areaHectares", "120"),
        ("startDate", "2024-01-01"),
        ("projectType", "Mangrove Afforestation"),
    ]
}
