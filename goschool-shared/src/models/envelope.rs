//! Request bodies and response envelopes of the directory API.

use serde::{Deserialize, Serialize};

use super::lenient;
use super::paginator::Paginator;
use super::product::Product;
use super::school::School;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub page: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default, deserialize_with = "lenient::flag")]
    pub status: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub status: Option<bool>,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileResponse {
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_admin: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductsResponse {
    #[serde(default)]
    pub status: Option<bool>,
    pub products: Paginator<Product>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchoolsResponse {
    #[serde(default)]
    pub status: Option<bool>,
    pub schools: Paginator<School>,
}

/// The `{status, message}` reply to create, update and delete requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationResponse {
    #[serde(default, deserialize_with = "lenient::flag")]
    pub status: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl MutationResponse {
    /// The success message, or the rejection message when `status` is false.
    ///
    /// # Errors
    /// Returns the API's message (or a generic one) for a rejected mutation.
    pub fn into_result(self) -> Result<Option<String>, String> {
        if self.status {
            Ok(self.message)
        } else {
            Err(self
                .message
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| "Something went wrong.".to_string()))
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoResponse {
    #[serde(default)]
    pub photo_url: Option<String>,
}

/// Wraps a body sent through `POST` so the API routes it as another verb.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodOverride<'a, T> {
    #[serde(flatten)]
    pub body: &'a T,
    #[serde(rename = "_method")]
    pub method: &'static str,
}

impl<'a, T> MethodOverride<'a, T> {
    pub const fn put(body: &'a T) -> Self {
        Self { body, method: "PUT" }
    }
}
