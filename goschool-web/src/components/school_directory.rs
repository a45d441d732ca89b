//! The schools table with search, URL-held pagination and the add/edit modal.
//! Rendered by the schools page and inside the map's right pane.

use log::{debug, warn};
use shared::api::SchoolApi;
use shared::listing::{ListQuery, RequestSequencer, fetch_schools};
use shared::models::{Paginator, School, SchoolDraft, SchoolField, SubmitMode};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_dispatch;

use crate::api::GoSchoolClient;
use crate::components::pagination_links::PaginationLinks;
use crate::components::school_form::SchoolForm;
use crate::components::schools_table::SchoolsTable;
use crate::components::search_form::SearchForm;
use crate::models::revision::Revision;
use crate::models::toasts::{notify_api_error, notify_error, notify_success, Toasts};
use crate::routes::Route;
use crate::session::use_session;

#[derive(Properties, PartialEq)]
pub struct SchoolDirectoryProps {
    /// List route whose URL holds the page and query.
    pub route: Route,
}

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[function_component(SchoolDirectory)]
pub fn school_directory(props: &SchoolDirectoryProps) -> Html {
    let session = use_session();
    let token = session.as_ref().and_then(|session| session.token());
    let is_admin = session.as_ref().is_some_and(|session| session.is_admin());
    let location = use_location();
    let navigator = use_navigator();
    let toasts = use_dispatch::<Toasts>();
    let schools = use_state(Paginator::<School>::default);
    let draft = use_state(|| None::<SchoolDraft>);
    let revision = use_reducer(Revision::default);
    let sequencer = use_memo((), |_| RequestSequencer::new());

    let query = location
        .map(|location| ListQuery::from_query_string(location.query_str()))
        .unwrap_or_default();

    {
        let schools = schools.clone();
        let toasts = toasts.clone();
        let sequencer = (*sequencer).clone();
        use_effect_with(
            (query.clone(), token.clone(), *revision),
            move |(query, token, _)| {
                if let Some(token) = token.clone() {
                    let request = query.request();
                    let ticket = sequencer.issue();
                    spawn_local(async move {
                        let result = fetch_schools(&GoSchoolClient::shared(), &token, &request).await;
                        if !sequencer.is_current(ticket) {
                            debug!("dropping superseded school list response");
                            return;
                        }
                        match result {
                            Ok(page) => {
                                if !page.is_consistent() {
                                    warn!(
                                        "school page {} has {} rows, expected {}",
                                        page.current_page,
                                        page.rendered_rows(),
                                        page.expected_rows()
                                    );
                                }
                                schools.set(page);
                            }
                            Err(err) => notify_api_error(&toasts, &err, "Failed to fetch schools."),
                        }
                    });
                }
                || ()
            },
        );
    }

    let on_search = {
        let navigator = navigator.clone();
        let route = props.route.clone();
        Callback::from(move |text: String| {
            if let Some(navigator) = &navigator {
                if let Err(err) = navigator.push_with_query(&route, &ListQuery::searching(&text)) {
                    warn!("could not update the search URL: {err}");
                }
            }
        })
    };

    let on_add = {
        let draft = draft.clone();
        Callback::from(move |_: MouseEvent| draft.set(Some(SchoolDraft::blank())))
    };
    let on_edit = {
        let draft = draft.clone();
        Callback::from(move |school: School| draft.set(Some(SchoolDraft::edit(school))))
    };
    let on_cancel = {
        let draft = draft.clone();
        Callback::from(move |()| draft.set(None))
    };
    let on_field = {
        let draft = draft.clone();
        Callback::from(move |(field, value): (SchoolField, String)| {
            if let Some(mut current) = (*draft).clone() {
                current.set(field, value);
                draft.set(Some(current));
            }
        })
    };
    let on_image = {
        let draft = draft.clone();
        Callback::from(move |url: Option<String>| {
            if let Some(mut current) = (*draft).clone() {
                current.set_image(url);
                draft.set(Some(current));
            }
        })
    };

    let on_submit = {
        let draft = draft.clone();
        let token = token.clone();
        let toasts = toasts.clone();
        let revision = revision.clone();
        Callback::from(move |()| {
            let (Some(current), Some(token)) = ((*draft).clone(), token.clone()) else {
                return;
            };
            let mode = match current.submission() {
                Ok(mode) => mode,
                Err(err) => {
                    notify_error(&toasts, err.to_string());
                    return;
                }
            };
            let draft = draft.clone();
            let toasts = toasts.clone();
            let revision = revision.clone();
            spawn_local(async move {
                let client = GoSchoolClient::shared();
                let result = match &mode {
                    SubmitMode::Create => client.create_school(&token, &current.school).await,
                    SubmitMode::Update(id) => client.update_school(&token, id, &current.school).await,
                };
                match result {
                    Ok(message) => {
                        let fallback = if mode.is_update() { "School updated" } else { "School added" };
                        notify_success(&toasts, message.unwrap_or_else(|| fallback.to_string()));
                        draft.set(None);
                        revision.dispatch(());
                    }
                    Err(err) => notify_api_error(
                        &toasts,
                        &err,
                        "An error occurred while submitting the form.",
                    ),
                }
            });
        })
    };

    let on_delete = {
        let token = token.clone();
        let toasts = toasts.clone();
        let revision = revision.clone();
        Callback::from(move |school: School| {
            let (Some(id), Some(token)) = (school.id.clone(), token.clone()) else {
                notify_error(&toasts, "School ID is required for deleting.");
                return;
            };
            if !confirm(&format!("Delete {}?", school.establishment_name)) {
                return;
            }
            let toasts = toasts.clone();
            let revision = revision.clone();
            spawn_local(async move {
                match GoSchoolClient::shared().delete_school(&token, &id).await {
                    Ok(message) => {
                        notify_success(&toasts, message.unwrap_or_else(|| "School deleted".to_string()));
                        revision.dispatch(());
                    }
                    Err(err) => notify_api_error(&toasts, &err, "Failed to delete school."),
                }
            });
        })
    };

    html! {
        <div class="space-y-4">
            <div class="flex items-center gap-4">
                <div class="flex-grow">
                    <SearchForm {on_search} initial={query.query.clone().map(AttrValue::from)} />
                </div>
                if is_admin {
                    <button class="rounded bg-green-600 px-4 py-2 text-white hover:bg-green-700" onclick={on_add}>
                        {"Add School"}
                    </button>
                }
            </div>
            <SchoolsTable schools={schools.data.clone()} {is_admin} {on_edit} {on_delete} />
            <div class="mt-4 bg-gray-100">
                <PaginationLinks<School> route={props.route.clone()} paginator={(*schools).clone()} state={query.clone()} />
            </div>
            if let Some(current) = (*draft).clone() {
                <SchoolForm draft={current} {on_field} {on_image} {on_submit} {on_cancel} />
            }
        </div>
    }
}
