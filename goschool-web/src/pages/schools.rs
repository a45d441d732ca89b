use yew::{Html, function_component, html};

use crate::components::school_directory::SchoolDirectory;
use crate::routes::Route;

/// `SchoolsPage` page component
#[function_component(SchoolsPage)]
pub fn schools_page() -> Html {
    html! {
        <div class="container mx-auto px-4 py-6">
            <h1 class="mb-4 text-2xl font-bold">{"Schools"}</h1>
            <SchoolDirectory route={Route::Schools} />
        </div>
    }
}
