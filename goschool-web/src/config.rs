//! Frontend configuration module
//!
//! Everything here is resolved at compile time from `GOSCHOOL_*` environment
//! variables so the bundle can be served as static files.

use log::Level;
use shared::map::style::DEFAULT_TILESET;

/// Frontend configuration for the API, the map and the asset host
#[derive(Debug, Clone)]
pub struct FrontendConfig {
    /// Base URL of the directory API, without a trailing slash
    pub api_url: String,
    pub mapbox_access_token: String,
    pub mapbox_tileset: String,
    /// Cloud name of the image host
    pub cloudinary_cloud: String,
    /// Image shown before anything is uploaded
    pub default_image: String,
    pub log_level: Level,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            api_url: option_env!("GOSCHOOL_API_URL")
                .unwrap_or("http://localhost:8000/api")
                .trim_end_matches('/')
                .to_string(),
            mapbox_access_token: option_env!("GOSCHOOL_MAPBOX_ACCESS_TOKEN")
                .unwrap_or_default()
                .to_string(),
            mapbox_tileset: option_env!("GOSCHOOL_MAPBOX_TILESET")
                .unwrap_or(DEFAULT_TILESET)
                .to_string(),
            cloudinary_cloud: option_env!("GOSCHOOL_CLOUDINARY_CLOUD")
                .unwrap_or("dagb1kdy2")
                .to_string(),
            default_image: option_env!("GOSCHOOL_DEFAULT_IMAGE")
                .unwrap_or("https://res.cloudinary.com/dagb1kdy2/image/upload/v1/next/default.jpg")
                .to_string(),
            log_level: option_env!("GOSCHOOL_LOG_LEVEL")
                .and_then(|level| level.parse().ok())
                .unwrap_or(Level::Info),
        }
    }
}

impl FrontendConfig {
    /// Create a new frontend configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn default_image(&self) -> &str {
        &self.default_image
    }

    /// Unsigned upload endpoint of the configured cloud
    pub fn upload_url(&self) -> String {
        shared::upload::upload_endpoint(&self.cloudinary_cloud)
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_frontend_config_default() {
        let config = FrontendConfig::default();
        assert!(config.api_url().starts_with("http"));
        assert!(!config.api_url().ends_with('/'));
        assert!(config.mapbox_tileset.starts_with("mapbox://"));
    }

    #[wasm_bindgen_test]
    fn test_upload_url_uses_cloud() {
        let config = FrontendConfig::new();
        assert!(config.upload_url().contains(&config.cloudinary_cloud));
        assert!(config.upload_url().ends_with("/image/upload"));
    }

    #[wasm_bindgen_test]
    fn test_frontend_config_debug() {
        let config = FrontendConfig::new();
        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("FrontendConfig"));
        assert!(debug_str.contains("mapbox_tileset"));
    }
}
