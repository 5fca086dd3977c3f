// src/listing/submit.rs
use thiserror::Error;

use crate::api::{ApiError, CreatedHouse, HouseApi, ImageHost, UploadError};
use crate::listing::form::{FormFailure, FormState, HouseDraft};

/// Which step of the submission sequence failed. Later steps never run.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("could not get an upload signature: {0}")]
    Signature(ApiError),
    #[error("image upload failed: {0}")]
    Upload(UploadError),
    #[error("could not create the listing: {0}")]
    Create(ApiError),
}

impl SubmitError {
    /// Short message safe to show on the form.
    pub fn user_message(&self) -> &'static str {
        match self {
            SubmitError::Signature(_) => "We couldn't prepare the image upload. Please try again.",
            SubmitError::Upload(_) => "Uploading the image failed. Your house was not saved.",
            SubmitError::Create(_) => "Saving the house failed. Please try again.",
        }
    }
}

/// Signature, then upload, then create: strictly in order.
pub fn submit_house(
    draft: &HouseDraft,
    api: &dyn HouseApi,
    images: &dyn ImageHost,
) -> Result<CreatedHouse, SubmitError> {
    let signature = api.create_image_signature().map_err(SubmitError::Signature)?;

    let uploaded = images
        .upload(&draft.image, &signature)
        .map_err(SubmitError::Upload)?;
    tracing::info!(url = %uploaded.secure_url, "image uploaded");

    let created = api
        .create_house(&draft.to_input(uploaded.secure_url))
        .map_err(SubmitError::Create)?;
    tracing::info!(id = %created.id, address = %draft.address, "house created");

    Ok(created)
}

impl FormState {
    /// Run the submission for a `Submitting` form; other states pass through.
    pub fn finish(self, api: &dyn HouseApi, images: &dyn ImageHost) -> FormState {
        let FormState::Submitting(draft) = self else {
            return self;
        };
        match submit_house(&draft, api, images) {
            Ok(created) => FormState::Success { id: created.id },
            Err(e) => {
                tracing::error!(error = %e, "house submission failed");
                FormState::Failed(FormFailure::Submit(e.user_message().to_string()))
            }
        }
    }
}
