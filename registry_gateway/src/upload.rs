//! Upload form client
//!
//! Native counterpart of the `/upload` page: holds the six form values,
//! refuses to send while a required value is missing, posts the rest as
//! multipart data, and maps the reply onto the form's status.

use async_trait::async_trait;
use reqwest::multipart::Form;

use crate::api::responses::SubmitResponse;
use crate::api::server::SUBMIT_PROJECT_PATH;
use crate::common::{Error, Result};
use crate::explorer::ExplorerLink;
use crate::submission;

pub const DEFAULT_PROJECT_TYPE: &str = "Mangrove Afforestation";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectForm {
    pub project_name: String,
    pub location: String,
    pub implementing_body: String,
    pub area_hectares: String,
    /// `YYYY-MM-DD`
    pub start_date: String,
    pub project_type: String,
}

impl Default for ProjectForm {
    fn default() -> Self {
        Self {
            project_name: String::new(),
            location: String::new(),
            implementing_body: String::new(),
            area_hectares: String::new(),
            start_date: String::new(),
            project_type: DEFAULT_PROJECT_TYPE.to_string(),
        }
    }
}

impl ProjectForm {
    /// Field names and values in form order
    pub fn fields(&self) -> [(&'static str, &str); 6] {
        [
            (submission::PROJECT_NAME, &self.project_name),
            (submission::LOCATION, &self.location),
            (submission::IMPLEMENTING_BODY, &self.implementing_body),
            (submission::AREA_HECTARES, &self.area_hectares),
            (submission::START_DATE, &self.start_date),
            (submission::PROJECT_TYPE, &self.project_type),
        ]
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        self.fields()
            .into_iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| name)
            .collect()
    }

    pub fn check_required(&self) -> Result<()> {
        match self.missing_fields().into_iter().next() {
            Some(name) => Err(Error::MissingField(name)),
            None => Ok(()),
        }
    }
}

/// Carries a filled form to the submission endpoint
#[async_trait]
pub trait FormTransport: Send + Sync {
    async fn post_form(&self, fields: Vec<(&'static str, String)>) -> Result<SubmitResponse>;
}

/// Multipart POST to a running gateway
pub struct HttpFormTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpFormTransport {
    /// `base_url` is the gateway root, e.g. `http://localhost:3000`.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), SUBMIT_PROJECT_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl FormTransport for HttpFormTransport {
    async fn post_form(&self, fields: Vec<(&'static str, String)>) -> Result<SubmitResponse> {
        let form = fields
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value));

        // Error replies carry a JSON body too, so the status code is not checked here.
        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;
        Ok(response.json::<SubmitResponse>().await?)
    }
}

/// `idle -> submitting -> success | error`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Submitting,
    Success {
        transaction_hash: String,
        explorer_url: String,
    },
    /// The endpoint answered with an error envelope
    Rejected { message: String },
    /// The request never produced a readable answer
    Failed { message: String },
}

impl FormStatus {
    pub fn from_response(response: SubmitResponse, explorer: &ExplorerLink) -> Self {
        match response {
            SubmitResponse::Success {
                transaction_hash, ..
            } => Self::Success {
                explorer_url: explorer.for_transaction(&transaction_hash),
                transaction_hash,
            },
            SubmitResponse::Error { message } => Self::Rejected { message },
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Rejected { .. } | Self::Failed { .. })
    }

    /// Text shown under the form
    pub fn message(&self) -> String {
        match self {
            Self::Idle => String::new(),
            Self::Submitting => "Submitting to the blockchain... Please wait.".to_string(),
            Self::Success { explorer_url, .. } => {
                format!("Success! View transaction: {}", explorer_url)
            }
            Self::Rejected { message } => format!("Error: {}", message),
            Self::Failed { message } => format!("Submission failed: {}", message),
        }
    }
}

/// Submit `form` through `transport`.
///
/// A missing required field returns `Err` before the transport is touched.
pub async fn submit_form(
    transport: &dyn FormTransport,
    form: &ProjectForm,
    explorer: &ExplorerLink,
) -> Result<FormStatus> {
    form.check_required()?;

    let fields = form
        .fields()
        .into_iter()
        .map(|(name, value)| (name, value.to_string()))
        .collect();

    Ok(match transport.post_form(fields).await {
        Ok(response) => FormStatus::from_response(response, explorer),
        Err(e) => FormStatus::Failed {
            message: e.to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_form_only_prefills_project_type() {
        let form = ProjectForm::default();
        assert_eq!(form.project_type, DEFAULT_PROJECT_TYPE);
        assert_eq!(
            form.missing_fields(),
            vec![
                submission::PROJECT_NAME,
                submission::LOCATION,
                submission::IMPLEMENTING_BODY,
                submission::AREA_HECTARES,
                submission::START_DATE,
            ]
        );
    }

    #[test]
    fn test_status_messages() {
        let explorer = ExplorerLink::default();
        let success = FormStatus::from_response(
            SubmitResponse::Success {
                message: "ok".to_string(),
                transaction_hash: "0xabc".to_string(),
                project_id: Some(1),
            },
            &explorer,
        );
        assert_eq!(
            success.message(),
            "Success! View transaction: https://sepolia.etherscan.io/tx/0xabc"
        );
        assert!(!success.is_error());

        let rejected = FormStatus::from_response(SubmitResponse::error("insufficient funds"), &explorer);
        assert_eq!(rejected.message(), "Error: insufficient funds");
        assert!(rejected.is_error());

        assert_eq!(
            FormStatus::Submitting.message(),
            "Submitting to the blockchain... Please wait."
        );
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let transport = HttpFormTransport::new("http://localhost:3000/");
        assert_eq!(transport.endpoint(), "http://localhost:3000/api/submit-project");
    }
}
