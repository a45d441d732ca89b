//! Transient user notifications, independent of how they are shown.

use serde::{Deserialize, Serialize};

use crate::api::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// An error notice for a failed API call. `fallback` replaces the generic
    /// text for errors that carry no message of their own.
    pub fn from_api_error(error: &ApiError, fallback: &str) -> Self {
        match error {
            ApiError::Rejected { .. } | ApiError::Unauthorized | ApiError::Network(_) => {
                Self::error(error.user_message())
            }
            _ => Self::error(fallback),
        }
    }

    pub const fn is_error(&self) -> bool {
        matches!(self.level, NoticeLevel::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_errors_keep_their_message() {
        let rejected = ApiError::Rejected {
            message: "Email taken".into(),
        };
        assert_eq!(
            Notice::from_api_error(&rejected, "Failed to fetch schools."),
            Notice::error("Email taken")
        );

        let decode = ApiError::Decode("eof".into());
        let notice = Notice::from_api_error(&decode, "Failed to fetch schools.");
        assert!(notice.is_error());
        assert_eq!(notice.message, "Failed to fetch schools.");
    }
}
