//! Dashboard reader: project count, then each record by index
//!
//! Records are fetched one at a time in index order (1..=count). Any failure
//! drops the whole result, so callers see either every project or none.

use serde::{Deserialize, Serialize};

use crate::common::{Error, Result};
use crate::contract::{ProjectRecord, RegistryReader};

/// Display shape of one registered project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: u64,
    pub name: String,
    pub location: String,
    pub hectares: u64,
}

impl From<ProjectRecord> for ProjectSummary {
    fn from(record: ProjectRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            location: record.location,
            hectares: record.area_hectares,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub projects: Vec<ProjectSummary>,
    pub total_projects: usize,
    pub total_hectares: u64,
}

impl DashboardView {
    pub fn new(projects: Vec<ProjectSummary>) -> Self {
        let total_hectares = projects
            .iter()
            .fold(0u64, |sum, project| sum.saturating_add(project.hectares));
        Self {
            total_projects: projects.len(),
            total_hectares,
            projects,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyReason {
    /// No read provider configured
    NoProvider,
    /// The fetch sequence failed part way
    FetchFailed,
}

/// Outcome of a dashboard load; loading has finished once one of these exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardState {
    Loaded(DashboardView),
    Empty(EmptyReason),
}

impl DashboardState {
    pub fn view(&self) -> DashboardView {
        match self {
            Self::Loaded(view) => view.clone(),
            Self::Empty(_) => DashboardView::default(),
        }
    }
}

/// Load the dashboard from `reader`; `None` means no provider is available.
pub async fn load_dashboard(reader: Option<&dyn RegistryReader>) -> DashboardState {
    let Some(reader) = reader else {
        log::info!("No registry read provider configured; dashboard left empty");
        return DashboardState::Empty(EmptyReason::NoProvider);
    };

    match fetch_projects(reader).await {
        Ok(projects) => DashboardState::Loaded(DashboardView::new(projects)),
        Err(e) => {
            log::error!("Failed to fetch projects: {}", e);
            DashboardState::Empty(EmptyReason::FetchFailed)
        }
    }
}

/// Fetch every project sequentially. Stops at the first error.
pub async fn fetch_projects(reader: &dyn RegistryReader) -> Result<Vec<ProjectSummary>> {
    let count = reader.project_count().await?;
    let mut projects = Vec::new();

    for id in 1..=count {
        let record = reader.project(id).await?;
        if !record.is_initialized {
            log::warn!("Project {} is registered but not initialized", id);
            return Err(Error::MalformedRecord {
                id,
                reason: "record is not initialized".to_string(),
            });
        }
        projects.push(ProjectSummary::from(record));
    }

    Ok(projects)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: u64, hectares: u64) -> ProjectSummary {
        ProjectSummary {
            id,
            name: format!("Project {}", id),
            location: "Odisha".to_string(),
            hectares,
        }
    }

    #[test]
    fn test_view_totals() {
        let view = DashboardView::new(vec![summary(1, 10), summary(2, 25)]);
        assert_eq!(view.total_projects, 2);
        assert_eq!(view.total_hectares, 35);
    }

    #[test]
    fn test_total_hectares_saturates() {
        let view = DashboardView::new(vec![summary(1, u64::MAX), summary(2, 1)]);
        assert_eq!(view.total_hectares, u64::MAX);
    }

    #[test]
    fn test_view_serializes_camel_case() {
        let json = serde_json::to_value(DashboardView::new(vec![summary(1, 5)])).unwrap();
        assert_eq!(json["totalProjects"], 1);
        assert_eq!(json["totalHectares"], 5);
        assert_eq!(json["projects"][0]["hectares"], 5);
    }

    #[test]
    fn test_empty_state_has_empty_view() {
        let state = DashboardState::Empty(EmptyReason::FetchFailed);
        assert_eq!(state.view(), DashboardView::default());
    }
}
