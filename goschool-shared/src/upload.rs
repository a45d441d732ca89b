//! Image uploads to the asset host.
//!
//! Files larger than [`MAX_UPLOAD_BYTES`] are refused before any request is
//! made. Everything else is sent once, unsigned, under a caller-chosen upload
//! preset, and the host's secure URL is reported back to the form.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::{ApiError, ApiResult};

/// 3 MB, decimal.
pub const MAX_UPLOAD_BYTES: u64 = 3_000_000;
/// Folder every upload is filed under.
pub const UPLOAD_FOLDER: &str = "next";
pub const PRODUCT_PRESET: &str = "nextProducts";
pub const SCHOOL_PRESET: &str = "nextSchools";

const IDLE_LABEL: &str = "Image (max size 3mb)";
const OVERSIZED_LABEL: &str = "The selected image exceeds 3mb";

/// Unsigned upload endpoint of the asset host for `cloud`.
pub fn upload_endpoint(cloud: &str) -> String {
    format!("https://api.cloudinary.com/v1_1/{cloud}/image/upload")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    pub preset: String,
    pub folder: String,
}

impl UploadTarget {
    pub fn new(preset: impl Into<String>) -> Self {
        Self {
            preset: preset.into(),
            folder: UPLOAD_FOLDER.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedAsset {
    pub secure_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("image is {size} bytes, over the 3 MB limit")]
    Oversized { size: u64 },
    #[error("upload failed: {0}")]
    Host(#[from] ApiError),
}

impl UploadError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Oversized { .. } => OVERSIZED_LABEL.to_string(),
            Self::Host(_) => "Image upload failed. Please try again.".to_string(),
        }
    }
}

/// # Errors
/// `Oversized` when `size` is over the limit.
pub fn check_size(size: u64) -> Result<(), UploadError> {
    if size > MAX_UPLOAD_BYTES {
        Err(UploadError::Oversized { size })
    } else {
        Ok(())
    }
}

/// A third-party host accepting unsigned image uploads.
#[cfg_attr(test, mockall::automock(type Payload = Vec<u8>;))]
#[async_trait(?Send)]
pub trait AssetHost {
    /// What the host uploads: a browser `File`, or bytes in tests.
    type Payload;

    async fn upload(&self, payload: Self::Payload, target: &UploadTarget) -> ApiResult<UploadedAsset>;
}

/// Checks the size, then uploads once and returns the hosted URL.
///
/// # Errors
/// `Oversized` without contacting the host, or `Host` when the upload fails.
pub async fn upload_image<H>(
    host: &H,
    payload: H::Payload,
    size: u64,
    target: &UploadTarget,
) -> Result<String, UploadError>
where
    H: AssetHost + ?Sized,
{
    check_size(size)?;
    let asset = host.upload(payload, target).await?;
    if asset.secure_url.trim().is_empty() {
        return Err(UploadError::Host(ApiError::MissingField("secure_url")));
    }
    Ok(asset.secure_url)
}

/// State of the image picker shown in product and school forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    default_image: String,
    preview: String,
    oversized: bool,
    can_revert: bool,
}

impl ImageUpload {
    /// Shows `initial` if set, otherwise `default_image`.
    pub fn new(initial: Option<&str>, default_image: &str) -> Self {
        Self {
            default_image: default_image.to_string(),
            preview: pick(initial, default_image),
            oversized: false,
            can_revert: false,
        }
    }

    pub fn preview(&self) -> &str {
        &self.preview
    }

    pub const fn is_oversized(&self) -> bool {
        self.oversized
    }

    pub const fn can_revert(&self) -> bool {
        self.can_revert
    }

    pub const fn label(&self) -> &'static str {
        if self.oversized { OVERSIZED_LABEL } else { IDLE_LABEL }
    }

    /// Records a file choice. Oversized files flag the label and stop here.
    ///
    /// # Errors
    /// `Oversized` when the file must not be uploaded.
    pub fn select(&mut self, size: u64) -> Result<(), UploadError> {
        let checked = check_size(size);
        self.oversized = checked.is_err();
        checked
    }

    /// Shows an uploaded image and returns the URL to report to the form.
    pub fn accept(&mut self, url: String) -> Option<String> {
        self.preview.clone_from(&url);
        self.oversized = false;
        self.can_revert = true;
        Some(url)
    }

    /// Drops the upload; the form is told there is no image.
    pub fn revert(&mut self) -> Option<String> {
        self.preview.clone_from(&self.default_image);
        self.oversized = false;
        self.can_revert = false;
        None
    }

    /// Follows the image held by the form.
    ///
    /// The form echoing back what the picker just reported changes nothing, so
    /// the revert button survives an upload. A different image, e.g. from
    /// editing another record, replaces the preview and hides it.
    pub fn follow(&mut self, image: Option<&str>) {
        let image = pick(image, &self.default_image);
        if image == self.preview {
            return;
        }
        self.preview = image;
        self.oversized = false;
        self.can_revert = false;
    }
}

fn pick(initial: Option<&str>, default_image: &str) -> String {
    initial
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .unwrap_or(default_image)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    const DEFAULT: &str = "https://img/default.jpg";

    #[test]
    fn test_size_gate() {
        assert!(check_size(MAX_UPLOAD_BYTES).is_ok());
        assert_eq!(
            check_size(MAX_UPLOAD_BYTES + 1),
            Err(UploadError::Oversized {
                size: MAX_UPLOAD_BYTES + 1
            })
        );
    }

    #[test]
    fn test_oversized_file_never_reaches_host() {
        let mut host = MockAssetHost::new();
        host.expect_upload().never();

        let result = block_on(upload_image(
            &host,
            vec![0; 4],
            3_500_000,
            &UploadTarget::new(PRODUCT_PRESET),
        ));
        let err = result.unwrap_err();
        assert!(err.user_message().contains("exceeds 3mb"));
    }

    #[test]
    fn test_small_file_uploads_once() {
        let mut host = MockAssetHost::new();
        host.expect_upload()
            .withf(|payload, target| {
                payload.len() == 3 && target.preset == SCHOOL_PRESET && target.folder == "next"
            })
            .times(1)
            .returning(|_, _| {
                Ok(UploadedAsset {
                    secure_url: "https://res.cloudinary.com/x/next/a.jpg".into(),
                })
            });

        let url = block_on(upload_image(
            &host,
            vec![1, 2, 3],
            3,
            &UploadTarget::new(SCHOOL_PRESET),
        ))
        .unwrap();
        assert_eq!(url, "https://res.cloudinary.com/x/next/a.jpg");
    }

    #[test]
    fn test_host_failure_is_reported() {
        let mut host = MockAssetHost::new();
        host.expect_upload()
            .returning(|_, _| Err(ApiError::Network("offline".into())));

        let err = block_on(upload_image(&host, vec![1], 1, &UploadTarget::new(PRODUCT_PRESET)))
            .unwrap_err();
        assert!(matches!(err, UploadError::Host(ApiError::Network(_))));
    }

    #[test]
    fn test_picker_lifecycle() {
        let mut picker = ImageUpload::new(None, DEFAULT);
        assert_eq!(picker.preview(), DEFAULT);
        assert_eq!(picker.label(), "Image (max size 3mb)");

        assert!(picker.select(5_000_000).is_err());
        assert!(picker.is_oversized());
        assert_eq!(picker.label(), "The selected image exceeds 3mb");

        assert!(picker.select(1_000).is_ok());
        assert!(!picker.is_oversized());
        assert_eq!(picker.accept("https://img/new.jpg".into()).as_deref(), Some("https://img/new.jpg"));
        assert!(picker.can_revert());

        assert_eq!(picker.revert(), None);
        assert_eq!(picker.preview(), DEFAULT);
        assert!(!picker.can_revert());
    }

    #[test]
    fn test_picker_follows_form_image() {
        let mut picker = ImageUpload::new(Some("https://img/school.jpg"), DEFAULT);
        assert_eq!(picker.preview(), "https://img/school.jpg");
        picker.follow(Some(""));
        assert_eq!(picker.preview(), DEFAULT);
    }

    #[test]
    fn test_revert_survives_form_echo() {
        let mut picker = ImageUpload::new(None, DEFAULT);
        assert!(picker.select(10).is_ok());
        let reported = picker.accept("https://img/uploaded.jpg".into());
        picker.follow(reported.as_deref());
        assert!(picker.can_revert());
        assert_eq!(picker.preview(), "https://img/uploaded.jpg");

        let reported = picker.revert();
        picker.follow(reported.as_deref());
        assert!(!picker.can_revert());
        assert_eq!(picker.preview(), DEFAULT);
    }

    #[test]
    fn test_other_record_hides_revert() {
        let mut picker = ImageUpload::new(None, DEFAULT);
        picker.accept("https://img/uploaded.jpg".into());
        picker.follow(Some("https://img/other-school.jpg"));
        assert!(!picker.can_revert());
        assert_eq!(picker.preview(), "https://img/other-school.jpg");
    }

    #[test]
    fn test_endpoint() {
        assert_eq!(
            upload_endpoint("dagb1kdy2"),
            "https://api.cloudinary.com/v1_1/dagb1kdy2/image/upload"
        );
    }
}
