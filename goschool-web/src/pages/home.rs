use yew::{Html, function_component, html};
use yew_router::prelude::Link;

use crate::routes::Route;

/// Landing page.
#[function_component(HomePage)]
pub fn home_page() -> Html {
    html! {
        <div class="flex min-h-[80vh] flex-col items-center justify-center gap-6 px-4 text-center">
            <h1 class="text-4xl font-bold">{ "Welcome to goSchool.uk" }</h1>
            <p class="max-w-xl text-gray-600">
                { "Find schools near you on the map, compare their Ofsted ratings and keep the directory up to date." }
            </p>
            <Link<Route> to={Route::Auth} classes="rounded bg-blue-600 px-6 py-3 text-white hover:bg-blue-700">
                { "Get Started" }
            </Link<Route>>
        </div>
    }
}
