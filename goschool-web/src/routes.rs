use log::debug;
use strum_macros::EnumIter;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::containers::layout::Layout;
use crate::pages::{AuthPage, DashboardPage, ErrorPage, HomePage, MapPage, SchoolsPage};
use crate::session::use_session;

/// The main routes
#[derive(Debug, Clone, PartialEq, Eq, Routable, EnumIter)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/auth")]
    Auth,
    #[at("/dashboard")]
    Dashboard,
    #[at("/schools")]
    Schools,
    #[at("/map")]
    Map,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    pub const fn requires_auth(&self) -> bool {
        matches!(self, Self::Dashboard | Self::Schools | Self::Map)
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Auth => "Login",
            Self::Dashboard => "Dashboard",
            Self::Schools => "Schools",
            Self::Map => "Map",
            Self::NotFound => "Not Found",
        }
    }

    /// Navbar links for the current session.
    pub fn nav_links(authenticated: bool) -> Vec<Self> {
        if authenticated {
            vec![Self::Map, Self::Schools, Self::Dashboard]
        } else {
            vec![Self::Home, Self::Auth]
        }
    }

    /// Where a login attempt sends the visitor. A failed attempt stays put.
    pub const fn after_login(logged_in: bool) -> Option<Self> {
        if logged_in { Some(Self::Map) } else { None }
    }

    /// Where a visitor asking for this route actually ends up.
    pub fn guard(self, authenticated: bool) -> Self {
        match self {
            route if route.requires_auth() && !authenticated => Self::Auth,
            Self::Auth if authenticated => Self::Map,
            route => route,
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct RouteViewProps {
    pub route: Route,
}

#[function_component(RouteView)]
fn route_view(props: &RouteViewProps) -> Html {
    let authenticated = use_session().is_some_and(|session| session.is_authenticated());
    let target = props.route.clone().guard(authenticated);
    if target != props.route {
        return html! { <Redirect<Route> to={target} /> };
    }

    let page = match &props.route {
        Route::Home => html! { <HomePage /> },
        Route::Auth => html! { <AuthPage /> },
        Route::Dashboard => html! { <DashboardPage /> },
        Route::Schools => html! { <SchoolsPage /> },
        Route::Map => html! { <MapPage /> },
        Route::NotFound => html! { <ErrorPage /> },
    };

    html! {
        <Layout current_route={props.route.clone()}>
            { page }
        </Layout>
    }
}

/// Switch function for the main routes.
pub fn switch(route: Route) -> Html {
    debug!("Switching to route: {route:?}");
    html! { <RouteView {route} /> }
}
