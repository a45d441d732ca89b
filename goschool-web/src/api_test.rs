//! Tests for the API client functionality
//!
//! Validates URL construction and how failed response bodies are turned into
//! user-facing messages.

#[cfg(test)]
mod tests {
    use crate::api::{GoSchoolClient, failure_message};

    /// Tests API client creation trims the trailing slash
    #[test]
    fn test_api_client_creation() {
        let client = GoSchoolClient::new("http://localhost:8000/api/");
        assert_eq!(client.api_url("schools"), "http://localhost:8000/api/schools");
    }

    /// Tests leading slashes on paths are not doubled
    #[test]
    fn test_api_url_with_leading_slash() {
        let client = GoSchoolClient::new("https://goschool.uk/api");
        assert_eq!(
            client.api_url("/school/photo"),
            "https://goschool.uk/api/school/photo"
        );
    }

    /// Tests validation bodies surface the first field message
    #[test]
    fn test_failure_message_prefers_field_errors() {
        let body = r#"{"message":"The given data was invalid.","errors":{"title":["The title field is required."]}}"#;
        assert_eq!(failure_message(body, "Unprocessable Content"), "The title field is required.");
    }

    /// Tests a plain message is used when there are no field errors
    #[test]
    fn test_failure_message_uses_message() {
        let body = r#"{"message":"Unauthenticated."}"#;
        assert_eq!(failure_message(body, "Unauthorized"), "Unauthenticated.");
    }

    /// Tests non-JSON bodies fall back to the status reason
    #[test]
    fn test_failure_message_fallback() {
        assert_eq!(failure_message("<html>502</html>", "Bad Gateway"), "Bad Gateway");
        assert_eq!(failure_message(r#"{"message":" "}"#, "Bad Gateway"), "Bad Gateway");
    }
}
