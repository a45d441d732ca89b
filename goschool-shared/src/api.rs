//! The directory API as seen by the client: an error taxonomy and one async
//! trait per resource. The web crate implements these over HTTP; tests use the
//! generated mocks.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    LoginRequest, LoginResponse, Paginator, Product, ProfileResponse, RegisterRequest,
    RegisterResponse, School, SearchRequest,
};

/// Everything that can go wrong talking to the directory API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),
    /// The API answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    /// The bearer token was missing, expired or revoked.
    #[error("not authenticated")]
    Unauthorized,
    /// The API answered `status: false`.
    #[error("rejected: {message}")]
    Rejected { message: String },
    /// The response body did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
    /// A successful response lacked a field the client needs.
    #[error("response is missing `{0}`")]
    MissingField(&'static str),
}

impl ApiError {
    /// Classifies an unsuccessful HTTP status.
    pub fn from_status(status: u16, message: &str) -> Self {
        match status {
            401 | 419 => Self::Unauthorized,
            422 => Self::Rejected {
                message: message.to_string(),
            },
            _ => Self::Http {
                status,
                message: message.to_string(),
            },
        }
    }

    /// Text suitable for a toast.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => "Unable to reach the server. Please try again.".to_string(),
            Self::Unauthorized => "Your session has expired. Please log in again.".to_string(),
            Self::Rejected { message } if !message.trim().is_empty() => message.clone(),
            Self::Http { .. } | Self::Rejected { .. } | Self::Decode(_) | Self::MissingField(_) => {
                "Something went wrong.".to_string()
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Authentication endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait(?Send)]
pub trait AuthApi {
    /// `POST /login`
    async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse>;

    /// `POST /register`
    async fn register(&self, request: &RegisterRequest) -> ApiResult<RegisterResponse>;

    /// `GET /profile` for the holder of `token`.
    async fn profile(&self, token: &str) -> ApiResult<ProfileResponse>;
}

/// Product CRUD endpoints. Mutations return the API's confirmation message.
#[cfg_attr(test, mockall::automock)]
#[async_trait(?Send)]
pub trait ProductApi {
    async fn list_products(&self, token: &str, page: u64) -> ApiResult<Paginator<Product>>;

    async fn create_product(&self, token: &str, product: &Product) -> ApiResult<Option<String>>;

    /// Sent as `POST` with a `_method: PUT` override.
    async fn update_product(
        &self,
        token: &str,
        id: u64,
        product: &Product,
    ) -> ApiResult<Option<String>>;

    async fn delete_product(&self, token: &str, id: u64) -> ApiResult<Option<String>>;
}

/// School listing, search and CRUD endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait(?Send)]
pub trait SchoolApi {
    async fn list_schools(&self, token: &str, page: u64) -> ApiResult<Paginator<School>>;

    async fn search_schools(
        &self,
        token: &str,
        request: &SearchRequest,
    ) -> ApiResult<Paginator<School>>;

    /// `GET /school/photo?id=`; `None` when the school has no photo.
    async fn school_photo(&self, token: &str, id: &str) -> ApiResult<Option<String>>;

    async fn create_school(&self, token: &str, school: &School) -> ApiResult<Option<String>>;

    async fn update_school(
        &self,
        token: &str,
        id: &str,
        school: &School,
    ) -> ApiResult<Option<String>>;

    async fn delete_school(&self, token: &str, id: &str) -> ApiResult<Option<String>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(401, ApiError::Unauthorized ; "unauthorized")]
    #[test_case(419, ApiError::Unauthorized ; "csrf expired")]
    #[test_case(422, ApiError::Rejected { message: "bad".into() } ; "validation")]
    #[test_case(500, ApiError::Http { status: 500, message: "bad".into() } ; "server error")]
    fn test_from_status(status: u16, expected: ApiError) {
        assert_eq!(ApiError::from_status(status, "bad"), expected);
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            ApiError::Rejected {
                message: "The title field is required.".into()
            }
            .user_message(),
            "The title field is required."
        );
        assert_eq!(
            ApiError::Rejected {
                message: " ".into()
            }
            .user_message(),
            "Something went wrong."
        );
        assert_eq!(
            ApiError::Decode("eof".into()).user_message(),
            "Something went wrong."
        );
        assert!(ApiError::Network("offline".into())
            .user_message()
            .contains("server"));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ApiError::MissingField("token").to_string(),
            "response is missing `token`"
        );
    }
}
