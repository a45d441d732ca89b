use yew::prelude::*;
use yew_icons::{Icon, IconId};
use yew_router::prelude::Link;

use crate::components::header_nav_item::HeaderNavItem;
use crate::routes::Route;
use crate::session::use_session;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    #[prop_or_default]
    pub current_route: Option<Route>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let session = use_session();
    let menu_open = use_state(|| false);
    let authenticated = session.as_ref().is_some_and(|session| session.is_authenticated());

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(!*menu_open))
    };
    let on_logout = session.map(|session| Callback::from(move |_: MouseEvent| session.logout()));

    let links = html! {
        {
            for Route::nav_links(authenticated).into_iter().map(|route| html! {
                <HeaderNavItem {route} current_route={props.current_route.clone()} />
            })
        }
    };
    let menu_icon = if *menu_open {
        IconId::HeroiconsOutlineXMark
    } else {
        IconId::HeroiconsOutlineBars3
    };

    html! {
        <nav class="bg-blue-600 shadow">
            <div class="mx-auto flex flex-wrap items-center justify-between px-4 py-3">
                <Link<Route> to={Route::Home} classes="flex items-center gap-2 text-xl font-semibold text-white">
                    <Icon icon_id={IconId::HeroiconsOutlineAcademicCap} class="h-6 w-6" />
                    {"goSchool.uk"}
                </Link<Route>>
                <button class="text-white md:hidden" onclick={toggle_menu} aria-label="Toggle navigation">
                    <Icon icon_id={menu_icon} class="h-6 w-6" />
                </button>
                <div class={classes!("w-full", "md:flex", "md:w-auto", (!*menu_open).then_some("hidden"))}>
                    <ul class="mt-3 flex flex-col gap-1 md:mt-0 md:flex-row md:items-center">
                        { links }
                        if authenticated {
                            <li>
                                <button class="rounded bg-red-500 px-3 py-2 text-white hover:bg-red-600" onclick={on_logout}>
                                    {"Logout"}
                                </button>
                            </li>
                        }
                    </ul>
                </div>
            </div>
        </nav>
    }
}
