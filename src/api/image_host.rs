// src/api/image_host.rs
use reqwest::blocking::multipart::Form;
use reqwest::blocking::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::api::ImageSignature;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("image host not configured")]
    NotConfigured,
    #[error("upload request failed: {0}")]
    Request(String),
    #[error("image host rejected upload: {status} - {body}")]
    Rejected { status: u16, body: String },
    #[error("unexpected upload response: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadedImage {
    pub secure_url: String,
}

/// Where listing photos go. `file` is the selected image as a data URL.
pub trait ImageHost: Send + Sync {
    fn upload(&self, file: &str, signature: &ImageSignature) -> Result<UploadedImage, UploadError>;

    /// Public delivery URL for an uploaded image, cropped to `width` x `height`.
    fn delivery_url(&self, public_id: &str, width: u32, height: u32) -> String;
}

pub struct CloudinaryUploader {
    cloud_name: String,
    api_key: String,
    client: Client,
}

impl CloudinaryUploader {
    pub fn new(cloud_name: String, api_key: String) -> Self {
        Self {
            cloud_name,
            api_key,
            client: Client::new(),
        }
    }

    fn upload_url(&self) -> String {
        format!(
            "https://api.cloudinary.com/v1_1/{}/upload",
            self.cloud_name
        )
    }
}

impl ImageHost for CloudinaryUploader {
    fn upload(&self, file: &str, signature: &ImageSignature) -> Result<UploadedImage, UploadError> {
        if self.cloud_name.is_empty() {
            return Err(UploadError::NotConfigured);
        }

        let form = Form::new()
            .text("file", file.to_string())
            .text("signature", signature.signature.clone())
            .text("timestamp", signature.timestamp.to_string())
            .text("api_key", self.api_key.clone());

        let response = self
            .client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .map_err(|e| UploadError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().unwrap_or_else(|_| "(no body)".to_string());
            return Err(UploadError::Rejected { status, body });
        }

        response
            .json::<UploadedImage>()
            .map_err(|e| UploadError::Decode(e.to_string()))
    }

    fn delivery_url(&self, public_id: &str, width: u32, height: u32) -> String {
        format!(
            "https://res.cloudinary.com/{}/image/upload/c_fill,g_auto,q_auto,dpr_auto,w_{width},h_{height}/{public_id}",
            self.cloud_name
        )
    }
}
