use yew::{Html, function_component, html};
use yew_router::prelude::Link;

use crate::routes::Route;

/// `ErrorPage` page component
#[function_component(ErrorPage)]
pub fn error_page() -> Html {
    html! {
        <div class="p-8 space-y-4 text-center">
            <h1 class="text-2xl font-bold">{ "Page not found" }</h1>
            <p>{ "The page you asked for does not exist." }</p>
            <Link<Route> to={Route::Home} classes="text-blue-600 underline">{ "Back to home" }</Link<Route>>
        </div>
    }
}
