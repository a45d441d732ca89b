//! Unsigned uploads to Cloudinary.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use shared::api::{ApiError, ApiResult};
use shared::upload::{AssetHost, UploadTarget, UploadedAsset};
use wasm_bindgen_futures::JsFuture;
use web_sys::File;

use crate::api::send;
use crate::config::FrontendConfig;

#[derive(Clone, Debug)]
pub struct CloudinaryHost {
    endpoint: String,
    client: Client,
}

impl CloudinaryHost {
    pub fn from_config(config: &FrontendConfig) -> Self {
        Self {
            endpoint: config.upload_url(),
            client: Client::new(),
        }
    }
}

async fn read_file(file: &File) -> ApiResult<Vec<u8>> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|err| ApiError::Decode(format!("could not read {}: {err:?}", file.name())))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

#[async_trait(?Send)]
impl AssetHost for CloudinaryHost {
    type Payload = File;

    async fn upload(&self, payload: File, target: &UploadTarget) -> ApiResult<UploadedAsset> {
        let bytes = read_file(&payload).await?;
        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(payload.name()))
            .text("upload_preset", target.preset.clone())
            .text("folder", target.folder.clone());
        send(self.client.post(&self.endpoint).multipart(form)).await
    }
}
