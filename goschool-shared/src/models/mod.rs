pub mod envelope;
pub mod errors;
mod lenient;
pub mod paginator;
pub mod product;
pub mod school;

pub use envelope::{
    LoginRequest, LoginResponse, MethodOverride, MutationResponse, PhotoResponse,
    ProductsResponse, ProfileResponse, RegisterRequest, RegisterResponse, SchoolsResponse,
    SearchRequest,
};
pub use errors::ErrorResponse;
pub use paginator::{PaginationLink, Paginator};
pub use product::{Product, ProductDraft};
pub use school::{DraftError, FeatureProjection, ProjectionError, School, SchoolDraft, SchoolField};

/// How a form submission should reach the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitMode {
    /// No identifier yet: `POST` a new record.
    Create,
    /// Existing record: update the record with this identifier.
    Update(String),
}

impl SubmitMode {
    /// Picks create or update from an optional identifier. Blank ids count as absent.
    pub fn from_id(id: Option<&str>) -> Self {
        match id.map(str::trim) {
            Some(id) if !id.is_empty() => Self::Update(id.to_string()),
            _ => Self::Create,
        }
    }

    pub const fn is_update(&self) -> bool {
        matches!(self, Self::Update(_))
    }
}

#[cfg(test)]
mod tests {
    use super::SubmitMode;

    #[test]
    fn blank_ids_create() {
        assert_eq!(SubmitMode::from_id(None), SubmitMode::Create);
        assert_eq!(SubmitMode::from_id(Some("  ")), SubmitMode::Create);
    }

    #[test]
    fn present_ids_update() {
        let mode = SubmitMode::from_id(Some("8f14e45f"));
        assert_eq!(mode, SubmitMode::Update("8f14e45f".to_string()));
        assert!(mode.is_update());
    }
}
