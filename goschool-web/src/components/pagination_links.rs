use shared::listing::ListQuery;
use shared::models::Paginator;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::routes::Route;

#[derive(Properties, PartialEq)]
pub struct PaginationLinksProps<T: PartialEq + 'static> {
    /// List route the links point at.
    pub route: Route,
    pub paginator: Paginator<T>,
    /// Current URL state; links keep its query.
    pub state: ListQuery,
}

/// Page links plus the "Showing X to Y of Z results" summary.
#[function_component(PaginationLinks)]
pub fn pagination_links<T: PartialEq + 'static>(props: &PaginationLinksProps<T>) -> Html {
    let navigator = use_navigator();
    let paginator = &props.paginator;

    let links = paginator.links.iter().map(|link| {
        let label = link.display_label();
        match link.target_page().filter(|_| link.is_navigable()) {
            Some(page) => {
                let target = props.state.with_page(page);
                let navigator = navigator.clone();
                let route = props.route.clone();
                let onclick = Callback::from(move |event: MouseEvent| {
                    event.prevent_default();
                    if let Some(navigator) = &navigator {
                        if let Err(err) = navigator.push_with_query(&route, &target) {
                            log::warn!("could not change page: {err}");
                        }
                    }
                });
                let class = if link.active {
                    "grid h-12 w-12 place-items-center border-x border-slate-50 bg-white font-bold text-indigo-500"
                } else {
                    "grid h-12 w-12 place-items-center border-x border-slate-50 bg-white hover:bg-slate-300"
                };
                html! {
                    <a href={props.state.with_page(page).href(&props.route.to_path())} {class} {onclick}>{ label }</a>
                }
            }
            None => html! {
                <span class="grid h-12 w-12 place-items-center border-x border-slate-50 bg-white text-slate-300">{ label }</span>
            },
        }
    });

    html! {
        <div class="flex items-center justify-between">
            <div class="flex items-center overflow-hidden rounded-md shadow-lg">
                if paginator.has_links() {
                    { for links }
                } else {
                    <span class="text-slate-500">{"No pagination links available"}</span>
                }
            </div>
            <p class="text-sm text-slate-600">{ paginator.summary() }</p>
        </div>
    }
}
