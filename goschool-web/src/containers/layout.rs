use yew::{Children, Html, Properties, function_component, html};

use crate::containers::header::Header;
use crate::routes::Route;

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub children: Children,
    #[prop_or_default]
    pub current_route: Option<Route>,
}

#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    html! {
        <>
            <Header current_route={props.current_route.clone()} />
            <main class="min-h-screen">
                { props.children.clone() }
            </main>
        </>
    }
}
