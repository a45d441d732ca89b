//! Session state and the login/register/logout flows behind it.
//!
//! [`Session`] is the only process-wide mutable state of the client. It is
//! owned by the session provider component and changed exclusively through
//! [`SessionAction`]s; [`SessionService`] performs the API calls and token
//! persistence that produce those actions.

use std::rc::Rc;

use cookie::{Cookie, SameSite};
use log::{debug, info, warn};
use time::{Duration, OffsetDateTime};

use crate::api::{ApiError, ApiResult, AuthApi};
use crate::models::{LoginRequest, RegisterRequest};

/// Name of the cookie holding the bearer token.
pub const AUTH_COOKIE: &str = "authToken";
pub const TOKEN_LIFETIME_DAYS: i64 = 7;
/// The route anonymous visitors may stay on.
pub const AUTH_PATH: &str = "/auth";

/// The current user's authentication state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub is_admin: bool,
    pub is_loading: bool,
}

impl Default for Session {
    /// The state before the persisted token has been looked at.
    fn default() -> Self {
        Self {
            token: None,
            is_admin: false,
            is_loading: true,
        }
    }
}

impl Session {
    pub const fn anonymous() -> Self {
        Self {
            token: None,
            is_admin: false,
            is_loading: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Initial restore finished with whatever token was persisted.
    Restored(Option<String>),
    LoginStarted,
    LoggedIn(String),
    /// A login or registration attempt ended without a new token.
    AttemptFinished,
    /// The admin flag looked up for `token`.
    AdminResolved { token: String, is_admin: bool },
    LoggedOut,
}

impl SessionAction {
    pub fn apply(self, session: &Session) -> Session {
        match self {
            Self::Restored(token) => Session {
                token,
                is_admin: false,
                is_loading: false,
            },
            Self::LoginStarted => Session {
                is_loading: true,
                ..session.clone()
            },
            Self::LoggedIn(token) => Session {
                token: Some(token),
                is_admin: false,
                is_loading: false,
            },
            Self::AttemptFinished => Session {
                is_loading: false,
                ..session.clone()
            },
            // Only the session the lookup was made for takes the flag.
            Self::AdminResolved { token, is_admin } => {
                if session.token() == Some(token.as_str()) {
                    Session {
                        is_admin,
                        ..session.clone()
                    }
                } else {
                    session.clone()
                }
            }
            Self::LoggedOut => Session::anonymous(),
        }
    }
}

impl yew::Reducible for Session {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(action.apply(&self))
    }
}

/// Where the bearer token is persisted between visits.
#[cfg_attr(test, mockall::automock)]
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// The `Set-Cookie`-style string that persists `token` for seven days.
pub fn auth_cookie(token: &str) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, token.to_string()))
        .path("/")
        .same_site(SameSite::Lax)
        .max_age(Duration::days(TOKEN_LIFETIME_DAYS))
        .build()
}

/// A cookie that deletes the persisted token.
pub fn expired_auth_cookie() -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, ""))
        .path("/")
        .same_site(SameSite::Lax)
        .max_age(Duration::ZERO)
        .expires(OffsetDateTime::UNIX_EPOCH)
        .build()
}

/// Finds the auth token in a `document.cookie` style header.
pub fn token_from_cookie_header(header: &str) -> Option<String> {
    Cookie::split_parse(header)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == AUTH_COOKIE)
        .map(|cookie| cookie.value().trim().to_string())
        .filter(|token| !token.is_empty())
}

/// Result of reading the persisted session on start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreOutcome {
    pub token: Option<String>,
    /// The visitor has no token and is somewhere other than the auth screen.
    pub redirect_home: bool,
}

/// Checks a registration form before it is sent.
///
/// # Errors
/// Returns the message to show when a field is blank or the passwords differ.
pub fn validate_registration(request: &RegisterRequest) -> Result<(), &'static str> {
    if request.name.trim().is_empty() {
        return Err("Name is required.");
    }
    if !request.email.contains('@') {
        return Err("A valid email address is required.");
    }
    if request.password.is_empty() {
        return Err("Password is required.");
    }
    if request.password != request.password_confirmation {
        return Err("Passwords do not match.");
    }
    Ok(())
}

/// Runs the session flows against an [`AuthApi`] and a [`TokenStore`].
#[derive(Debug, Clone)]
pub struct SessionService<A, S> {
    api: A,
    store: S,
}

impl<A: AuthApi, S: TokenStore> SessionService<A, S> {
    pub const fn new(api: A, store: S) -> Self {
        Self { api, store }
    }

    pub fn restore(&self, current_path: &str) -> RestoreOutcome {
        let token = self.store.load();
        let redirect_home = token.is_none() && current_path != AUTH_PATH;
        debug!(
            "session restore: token present = {}, path = {current_path}",
            token.is_some()
        );
        RestoreOutcome {
            token,
            redirect_home,
        }
    }

    /// Looks up the admin flag. Failures are logged and read as "not admin".
    pub async fn resolve_admin(&self, token: &str) -> bool {
        match self.api.profile(token).await {
            Ok(profile) => profile.is_admin,
            Err(err) => {
                warn!("Error fetching user role: {err}");
                false
            }
        }
    }

    /// Exchanges credentials for a token and persists it.
    ///
    /// # Errors
    /// `Rejected` for bad credentials, `MissingField` when the API reports
    /// success without a token, or the transport error.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<String> {
        let response = self
            .api
            .login(&LoginRequest {
                email: email.trim().to_string(),
                password: password.to_string(),
            })
            .await?;

        if !response.status {
            return Err(ApiError::Rejected {
                message: "Invalid login details".to_string(),
            });
        }
        let token = response
            .token
            .filter(|token| !token.is_empty())
            .ok_or(ApiError::MissingField("token"))?;

        self.store.save(&token);
        info!("login succeeded");
        Ok(token)
    }

    /// Registers a new account and returns the API's confirmation message.
    ///
    /// # Errors
    /// `Rejected` for a form that fails local validation or that the API
    /// refuses, or the transport error.
    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<String> {
        validate_registration(request).map_err(|message| ApiError::Rejected {
            message: message.to_string(),
        })?;

        let response = self.api.register(request).await?;
        if response.status == Some(false) {
            return Err(ApiError::Rejected {
                message: response.message,
            });
        }
        Ok(response.message)
    }

    pub fn logout(&self) -> Session {
        self.store.clear();
        info!("logged out");
        Session::anonymous()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockAuthApi;
    use crate::models::{LoginResponse, ProfileResponse, RegisterResponse};
    use futures::executor::block_on;
    use mockall::predicate::eq;

    fn registration(confirmation: &str) -> RegisterRequest {
        RegisterRequest {
            name: "Jo".into(),
            email: "jo@example.com".into(),
            password: "secret123".into(),
            password_confirmation: confirmation.into(),
        }
    }

    #[test]
    fn test_reducer_transitions() {
        let start = Session::default();
        assert!(start.is_loading);

        let restored = SessionAction::Restored(Some("t".into())).apply(&start);
        assert_eq!(restored.token(), Some("t"));
        assert!(!restored.is_loading);

        let admin = SessionAction::AdminResolved {
            token: "t".into(),
            is_admin: true,
        }
        .apply(&restored);
        assert!(admin.is_admin);

        let out = SessionAction::LoggedOut.apply(&admin);
        assert_eq!(out, Session::anonymous());

        let stale = SessionAction::AdminResolved {
            token: "t".into(),
            is_admin: true,
        }
        .apply(&out);
        assert!(!stale.is_admin);
    }

    #[test]
    fn test_admin_flag_for_previous_user_is_ignored() {
        let admin = SessionAction::LoggedIn("admin-token".into()).apply(&Session::anonymous());
        let out = SessionAction::LoggedOut.apply(&admin);
        let user = SessionAction::LoggedIn("user-token".into()).apply(&out);

        let late = SessionAction::AdminResolved {
            token: "admin-token".into(),
            is_admin: true,
        }
        .apply(&user);
        assert!(!late.is_admin);
        assert_eq!(late.token(), Some("user-token"));

        let own = SessionAction::AdminResolved {
            token: "user-token".into(),
            is_admin: false,
        }
        .apply(&late);
        assert_eq!(own, user);
    }

    #[test]
    fn test_failed_attempt_keeps_token_state() {
        let anonymous = Session::anonymous();
        let loading = SessionAction::LoginStarted.apply(&anonymous);
        assert!(loading.is_loading);
        let finished = SessionAction::AttemptFinished.apply(&loading);
        assert_eq!(finished, anonymous);
    }

    #[test]
    fn test_auth_cookie_shape() {
        let cookie = auth_cookie("1|abc").to_string();
        assert!(cookie.starts_with("authToken=1|abc"));
        assert!(cookie.contains("Max-Age=604800"));
        assert!(cookie.contains("Path=/"));

        let removal = expired_auth_cookie().to_string();
        assert!(removal.contains("Max-Age=0"));
        assert!(removal.contains("1970"));
    }

    #[test]
    fn test_token_from_cookie_header() {
        assert_eq!(
            token_from_cookie_header("theme=dark; authToken=1|abc; other=x"),
            Some("1|abc".into())
        );
        assert_eq!(token_from_cookie_header("authToken="), None);
        assert_eq!(token_from_cookie_header(""), None);
    }

    #[test]
    fn test_restore_redirects_anonymous_visitors() {
        let mut store = MockTokenStore::new();
        store.expect_load().return_const(None::<String>);
        let service = SessionService::new(MockAuthApi::new(), store);

        assert!(service.restore("/map").redirect_home);
        assert!(!service.restore(AUTH_PATH).redirect_home);
    }

    #[test]
    fn test_restore_keeps_persisted_token() {
        let mut store = MockTokenStore::new();
        store.expect_load().return_const(Some("1|abc".to_string()));
        let service = SessionService::new(MockAuthApi::new(), store);

        let outcome = service.restore("/schools");
        assert_eq!(outcome.token.as_deref(), Some("1|abc"));
        assert!(!outcome.redirect_home);
    }

    #[test]
    fn test_login_persists_token() {
        let mut api = MockAuthApi::new();
        api.expect_login()
            .withf(|request| request.email == "jo@example.com")
            .times(1)
            .returning(|_| {
                Ok(LoginResponse {
                    status: true,
                    token: Some("1|abc".into()),
                    message: None,
                })
            });
        let mut store = MockTokenStore::new();
        store.expect_save().with(eq("1|abc")).times(1).return_const(());

        let service = SessionService::new(api, store);
        let token = block_on(service.login(" jo@example.com ", "pw")).unwrap();
        assert_eq!(token, "1|abc");
    }

    #[test]
    fn test_login_rejection_saves_nothing() {
        let mut api = MockAuthApi::new();
        api.expect_login()
            .returning(|_| Ok(LoginResponse::default()));
        let mut store = MockTokenStore::new();
        store.expect_save().never();

        let service = SessionService::new(api, store);
        let err = block_on(service.login("jo@example.com", "wrong")).unwrap_err();
        assert_eq!(err.user_message(), "Invalid login details");
    }

    #[test]
    fn test_login_without_token_is_an_error() {
        let mut api = MockAuthApi::new();
        api.expect_login().returning(|_| {
            Ok(LoginResponse {
                status: true,
                token: None,
                message: None,
            })
        });
        let service = SessionService::new(api, MockTokenStore::new());
        assert_eq!(
            block_on(service.login("jo@example.com", "pw")),
            Err(ApiError::MissingField("token"))
        );
    }

    #[test]
    fn test_resolve_admin_is_best_effort() {
        let mut api = MockAuthApi::new();
        api.expect_profile()
            .with(eq("good"))
            .returning(|_| Ok(ProfileResponse { is_admin: true }));
        api.expect_profile()
            .with(eq("bad"))
            .returning(|_| Err(ApiError::Unauthorized));
        let service = SessionService::new(api, MockTokenStore::new());

        assert!(block_on(service.resolve_admin("good")));
        assert!(!block_on(service.resolve_admin("bad")));
    }

    #[test]
    fn test_register_validates_locally() {
        let mut api = MockAuthApi::new();
        api.expect_register().never();
        let service = SessionService::new(api, MockTokenStore::new());

        let err = block_on(service.register(&registration("different"))).unwrap_err();
        assert_eq!(err.user_message(), "Passwords do not match.");
    }

    #[test]
    fn test_register_returns_message() {
        let mut api = MockAuthApi::new();
        api.expect_register().times(1).returning(|_| {
            Ok(RegisterResponse {
                status: Some(true),
                message: "User registered successfully".into(),
            })
        });
        let service = SessionService::new(api, MockTokenStore::new());

        let message = block_on(service.register(&registration("secret123"))).unwrap();
        assert_eq!(message, "User registered successfully");
    }

    #[test]
    fn test_logout_clears_store() {
        let mut store = MockTokenStore::new();
        store.expect_clear().times(1).return_const(());
        let service = SessionService::new(MockAuthApi::new(), store);
        assert_eq!(service.logout(), Session::anonymous());
    }
}
