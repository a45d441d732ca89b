use yew::{Html, function_component, html};
use yew_router::prelude::*;
use yewdux::YewduxRoot;

use crate::components::toaster::Toaster;
use crate::routes::{Route, switch};
use crate::session::SessionProvider;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <YewduxRoot>
            <BrowserRouter>
                <SessionProvider>
                    <Switch<Route> render={switch} />
                </SessionProvider>
                <Toaster />
            </BrowserRouter>
        </YewduxRoot>
    }
}
