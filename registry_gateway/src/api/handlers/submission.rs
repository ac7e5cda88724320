use axum::extract::{multipart::MultipartRejection, Multipart, State};

use crate::api::responses::SubmitResponse;
use crate::api::server::AppState;
use crate::common::{Error, Result};
use crate::contract::{RegisterProject, Registration};
use crate::submission::SubmissionFields;

/// `POST /api/submit-project`
///
/// Forwards the form to `registerProject` and waits for confirmation. Every
/// failure, including a body that is not multipart, comes back as the error
/// envelope with status 500.
pub async fn submit_project(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> SubmitResponse {
    match register(&state, multipart).await {
        Ok(registration) => {
            log::info!(
                "Project registered in transaction {}",
                registration.transaction_hash
            );
            SubmitResponse::from(registration)
        }
        Err(e) => {
            log::error!("Project submission failed: {}", e);
            SubmitResponse::from(e)
        }
    }
}

async fn register(
    state: &AppState,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Registration> {
    let mut multipart = multipart.map_err(|e| Error::Form(e.body_text()))?;
    let fields = read_fields(&mut multipart).await?;
    let call = RegisterProject::from_fields(&fields)?;
    state.registrar.register_project(&call).await
}

/// Collect text fields; the first value of a repeated name wins.
async fn read_fields(multipart: &mut Multipart) -> Result<SubmissionFields> {
    let mut fields = SubmissionFields::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::Form(e.body_text()))?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        let value = field.text().await.map_err(|e| Error::Form(e.body_text()))?;
        fields.insert(name, value);
    }

    Ok(fields)
}
