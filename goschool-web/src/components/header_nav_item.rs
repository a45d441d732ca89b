use yew::{Html, Properties, classes, function_component, html};
use yew_router::prelude::Link;

use crate::routes::Route;

#[derive(Properties, PartialEq, Eq)]
pub struct HeaderNavItemProps {
    pub route: Route,
    pub current_route: Option<Route>,
}

#[function_component(HeaderNavItem)]
pub fn header_nav_item(props: &HeaderNavItemProps) -> Html {
    let active = if props.current_route.as_ref() == Some(&props.route) {
        "bg-blue-700"
    } else {
        ""
    };

    html! {
        <li>
            <Link<Route> to={props.route.clone()} classes={classes!("block", "rounded", "px-3", "py-2", "text-white", "hover:bg-blue-700", active)}>
                { props.route.label() }
            </Link<Route>>
        </li>
    }
}
