//! The map screen: the Mapbox widget between a detail pane on the left and a
//! filters/table pane on the right.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::{debug, warn};
use shared::api::SchoolApi;
use shared::map::{MapCamera, MapEffect, MapEvent, MapView};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlElement;
use yew::prelude::*;
use yewdux::Dispatch;
use yewdux::prelude::use_dispatch;

use crate::api::GoSchoolClient;
use crate::components::map_filters::MapFilters;
use crate::components::school_detail::SchoolDetail;
use crate::components::school_directory::SchoolDirectory;
use crate::config::FrontendConfig;
use crate::map::widget::SchoolMap;
use crate::models::toasts::{Toasts, notify};
use crate::routes::Route;
use crate::session::use_session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RightTab {
    Filters,
    Table,
}

/// Everything event handlers need to drive the screen.
#[derive(Clone)]
struct MapScreen {
    view: Rc<RefCell<MapView>>,
    widget: Rc<RefCell<Option<SchoolMap>>>,
    token: Rc<RefCell<Option<String>>>,
    toasts: Dispatch<Toasts>,
    refresh: UseForceUpdateHandle,
}

impl MapScreen {
    fn handle(&self, event: MapEvent) {
        let effects = match self.view.try_borrow_mut() {
            Ok(mut view) => view.handle(event),
            Err(_) => {
                warn!("map event arrived while the view was busy: {event:?}");
                return;
            }
        };
        for effect in effects {
            self.run(effect);
        }
        self.refresh.force_update();
    }

    fn run(&self, effect: MapEffect) {
        match effect {
            MapEffect::FetchPhoto { school_id, ticket } => {
                let Some(token) = self.token.borrow().clone() else {
                    return;
                };
                let screen = self.clone();
                spawn_local(async move {
                    let event = match GoSchoolClient::shared().school_photo(&token, &school_id).await {
                        Ok(photo_url) => MapEvent::PhotoLoaded { ticket, photo_url },
                        Err(error) => MapEvent::PhotoFailed { ticket, error },
                    };
                    screen.handle(event);
                });
            }
            MapEffect::ResizeMap { delay_ms } => {
                let widget = self.widget.clone();
                Timeout::new(delay_ms, move || {
                    if let Some(widget) = widget.borrow().as_ref() {
                        widget.resize();
                    }
                })
                .forget();
            }
            MapEffect::Notify(notice) => notify(&self.toasts, notice),
            effect => match self.widget.try_borrow_mut() {
                Ok(mut widget) => {
                    if let Some(widget) = widget.as_mut() {
                        widget.apply(&effect);
                    }
                }
                Err(_) => warn!("map widget busy, dropped {effect:?}"),
            },
        }
    }

    fn callback<T: 'static>(&self, to_event: impl Fn(T) -> MapEvent + 'static) -> Callback<T> {
        let screen = self.clone();
        Callback::from(move |value| screen.handle(to_event(value)))
    }
}

/// `MapPage` page component
#[function_component(MapPage)]
pub fn map_page() -> Html {
    let config = use_memo((), |_| FrontendConfig::new());
    let session = use_session();
    let toasts = use_dispatch::<Toasts>();
    let container = use_node_ref();
    let refresh = use_force_update();
    let tab = use_state(|| RightTab::Filters);
    let view = {
        let tileset = config.mapbox_tileset.clone();
        use_mut_ref(move || MapView::new(tileset))
    };
    let widget = use_mut_ref(|| None::<SchoolMap>);
    let token = use_mut_ref(|| None::<String>);
    token.replace(session.as_ref().and_then(|session| session.token()));

    let screen = MapScreen {
        view,
        widget,
        token,
        toasts,
        refresh,
    };

    {
        let screen = screen.clone();
        let container = container.clone();
        let access_token = config.mapbox_access_token.clone();
        use_effect_with((), move |_| {
            match container.cast::<HtmlElement>() {
                Some(element) => {
                    let on_event = screen.callback(|event: MapEvent| event);
                    let mounted =
                        SchoolMap::mount(&element, &MapCamera::default(), &access_token, &on_event);
                    screen.widget.replace(Some(mounted));
                }
                None => warn!("map container missing, widget not created"),
            }
            move || {
                let removed = screen.widget.borrow_mut().take();
                drop(removed);
                debug!("map page unmounted");
            }
        });
    }

    let on_close = screen.callback(|()| MapEvent::ClosePanes);
    let on_overlay = screen.callback(|_: MouseEvent| MapEvent::ClosePanes);
    let on_toggle = screen.callback(|_: MouseEvent| MapEvent::ToggleRightPane);
    let on_status = screen.callback(MapEvent::StatusToggled);
    let on_phase = screen.callback(MapEvent::PhaseToggled);
    let select_tab = |target: RightTab| {
        let tab = tab.clone();
        Callback::from(move |_: MouseEvent| tab.set(target))
    };

    let view = screen.view.borrow();
    let selected = view.selected().cloned();
    let tab_class = |target: RightTab| {
        if *tab == target {
            "flex-1 border-b-2 border-blue-600 py-2 font-semibold"
        } else {
            "flex-1 py-2 text-gray-500"
        }
    };

    html! {
        <div class="relative flex overflow-hidden" style="height: calc(100vh - 60px)">
            <aside class={classes!(
                "absolute", "inset-y-0", "left-0", "z-30", "w-full", "bg-white", "shadow-lg",
                "transition-transform", "duration-300", "md:w-1/3",
                if view.is_left_open() { "translate-x-0" } else { "-translate-x-full" }
            )}>
                if let Some(school) = selected {
                    <SchoolDetail {school} {on_close} />
                }
            </aside>
            if view.is_left_open() {
                <div class="absolute inset-0 z-20 bg-black bg-opacity-25" onclick={on_overlay}></div>
            }
            <div class="relative flex-grow">
                <div ref={container} class="h-full w-full"></div>
                <button
                    class="absolute right-2 top-2 z-10 rounded bg-white px-3 py-1 text-lg shadow hover:bg-gray-100"
                    onclick={on_toggle}
                    aria-label="Toggle filters and table"
                >
                    { view.toggle_label() }
                </button>
            </div>
            <aside class={classes!(
                "h-full", "overflow-y-auto", "border-l", "border-gray-200", "bg-white",
                "transition-all", "duration-300",
                if view.is_right_open() { "w-full md:w-1/2 p-4" } else { "w-0 p-0" }
            )}>
                if view.is_right_open() {
                    <div class="mb-4 flex">
                        <button class={tab_class(RightTab::Filters)} onclick={select_tab(RightTab::Filters)}>{"Filters"}</button>
                        <button class={tab_class(RightTab::Table)} onclick={select_tab(RightTab::Table)}>{"Table"}</button>
                    </div>
                    if *tab == RightTab::Filters {
                        <MapFilters
                            status={*view.status_filter()}
                            phases={*view.phase_filter()}
                            on_status={on_status}
                            on_phase={on_phase}
                        />
                    } else {
                        <SchoolDirectory route={Route::Map} />
                    }
                }
            </aside>
        </div>
    }
}
