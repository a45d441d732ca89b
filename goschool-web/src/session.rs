//! Session context: the cookie-backed token store and the provider component
//! every page reads the token and admin flag from.

use log::warn;
use shared::models::RegisterRequest;
use shared::session::{
    Session, SessionAction, SessionService, TokenStore, auth_cookie, expired_auth_cookie,
    token_from_cookie_header,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlDocument;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::Dispatch;
use yewdux::prelude::use_dispatch;

use crate::api::GoSchoolClient;
use crate::components::loading::Loading;
use crate::models::toasts::{Toasts, notify_api_error, notify_success};
use crate::routes::Route;

fn html_document() -> Option<HtmlDocument> {
    web_sys::window()?.document()?.dyn_into().ok()
}

fn write_cookie(cookie: &str) {
    let Some(document) = html_document() else {
        warn!("no document to write the auth cookie to");
        return;
    };
    if let Err(err) = document.set_cookie(cookie) {
        warn!("could not write the auth cookie: {err:?}");
    }
}

/// Keeps the bearer token in the `authToken` cookie.
#[derive(Debug, Clone, Copy, Default)]
pub struct CookieTokenStore;

impl TokenStore for CookieTokenStore {
    fn load(&self) -> Option<String> {
        let header = html_document()?.cookie().ok()?;
        token_from_cookie_header(&header)
    }

    fn save(&self, token: &str) {
        write_cookie(&auth_cookie(token).to_string());
    }

    fn clear(&self) {
        write_cookie(&expired_auth_cookie().to_string());
    }
}

fn service() -> SessionService<GoSchoolClient, CookieTokenStore> {
    SessionService::new(GoSchoolClient::shared(), CookieTokenStore)
}

/// What pages get from the session context.
#[derive(Clone)]
pub struct SessionHandle {
    state: UseReducerHandle<Session>,
    navigator: Option<Navigator>,
    toasts: Dispatch<Toasts>,
}

impl PartialEq for SessionHandle {
    fn eq(&self, other: &Self) -> bool {
        *self.state == *other.state
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("session", &*self.state)
            .finish_non_exhaustive()
    }
}

impl SessionHandle {
    pub fn session(&self) -> &Session {
        &self.state
    }

    pub fn token(&self) -> Option<String> {
        self.state.token.clone()
    }

    pub fn is_admin(&self) -> bool {
        self.state.is_admin
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    fn navigate(&self, route: &Route) {
        if let Some(navigator) = &self.navigator {
            navigator.push(route);
        }
    }

    /// One attempt per call. Success lands on the map.
    pub fn login(&self, email: String, password: String) {
        self.state.dispatch(SessionAction::LoginStarted);
        let handle = self.clone();
        spawn_local(async move {
            let result = service().login(&email, &password).await;
            let next = Route::after_login(result.is_ok());
            match result {
                Ok(token) => {
                    handle.state.dispatch(SessionAction::LoggedIn(token));
                    notify_success(&handle.toasts, "Login successful");
                }
                Err(err) => {
                    handle.state.dispatch(SessionAction::AttemptFinished);
                    notify_api_error(&handle.toasts, &err, "Invalid login details");
                }
            }
            if let Some(route) = next {
                handle.navigate(&route);
            }
        });
    }

    pub fn register(&self, request: RegisterRequest) {
        self.state.dispatch(SessionAction::LoginStarted);
        let handle = self.clone();
        spawn_local(async move {
            match service().register(&request).await {
                Ok(message) => notify_success(&handle.toasts, message),
                Err(err) => notify_api_error(&handle.toasts, &err, "Registration failed."),
            }
            handle.state.dispatch(SessionAction::AttemptFinished);
        });
    }

    pub fn logout(&self) {
        service().logout();
        self.state.dispatch(SessionAction::LoggedOut);
        notify_success(&self.toasts, "Logout successful");
        self.navigate(&Route::Auth);
    }
}

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    pub children: Children,
}

/// Restores the persisted session once on mount and provides it to `children`.
#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let state = use_reducer(Session::default);
    let navigator = use_navigator();
    let location = use_location();
    let toasts = use_dispatch::<Toasts>();

    {
        let state = state.clone();
        let navigator = navigator.clone();
        let path = location.map(|location| location.path().to_string()).unwrap_or_default();
        use_effect_with((), move |_| {
            let outcome = service().restore(&path);
            state.dispatch(SessionAction::Restored(outcome.token));
            if outcome.redirect_home {
                if let Some(navigator) = navigator {
                    navigator.push(&Route::Home);
                }
            }
            || ()
        });
    }

    {
        let state = state.clone();
        use_effect_with(state.token.clone(), move |token| {
            if let Some(token) = token.clone() {
                spawn_local(async move {
                    let is_admin = service().resolve_admin(&token).await;
                    state.dispatch(SessionAction::AdminResolved { token, is_admin });
                });
            }
            || ()
        });
    }

    let handle = SessionHandle {
        state: state.clone(),
        navigator,
        toasts,
    };

    html! {
        <ContextProvider<SessionHandle> context={handle}>
            if state.is_loading {
                <Loading />
            } else {
                { props.children.clone() }
            }
        </ContextProvider<SessionHandle>>
    }
}

/// The session context, when rendered under a [`SessionProvider`].
#[hook]
pub fn use_session() -> Option<SessionHandle> {
    use_context::<SessionHandle>()
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_cookie_store_round_trip() {
        let store = CookieTokenStore;
        store.save("abc123");
        assert_eq!(store.load().as_deref(), Some("abc123"));
        store.clear();
        assert_eq!(store.load(), None);
    }
}
