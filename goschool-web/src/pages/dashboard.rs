use log::{debug, warn};
use shared::api::ProductApi;
use shared::listing::{ListQuery, RequestSequencer};
use shared::models::{Paginator, Product, ProductDraft};
use shared::upload::PRODUCT_PRESET;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_dispatch;

use crate::api::GoSchoolClient;
use crate::components::image_upload::ImageUpload;
use crate::components::pagination_links::PaginationLinks;
use crate::config::FrontendConfig;
use crate::models::revision::Revision;
use crate::models::toasts::{Toasts, notify_api_error, notify_error, notify_success};
use crate::routes::Route;
use crate::session::use_session;

const INPUT: &str = "mb-3 w-full rounded border border-gray-300 p-2 focus:outline-none focus:ring-2 focus:ring-indigo-500";
const CELL: &str = "border border-gray-300 px-4 py-2";

fn text_input(draft: &UseStateHandle<ProductDraft>, apply: fn(&mut ProductDraft, String)) -> Callback<InputEvent> {
    let draft = draft.clone();
    Callback::from(move |event: InputEvent| {
        let input: HtmlInputElement = event.target_unchecked_into();
        let mut current = (*draft).clone();
        apply(&mut current, input.value());
        draft.set(current);
    })
}

/// `DashboardPage` page component: product CRUD.
#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let config = use_memo((), |_| FrontendConfig::new());
    let session = use_session();
    let token = session.as_ref().and_then(|session| session.token());
    let location = use_location();
    let toasts = use_dispatch::<Toasts>();
    let products = use_state(Paginator::<Product>::default);
    let draft = {
        let default_image = config.default_image().to_string();
        use_state(move || ProductDraft::blank(&default_image))
    };
    let revision = use_reducer(Revision::default);
    let sequencer = use_memo((), |_| RequestSequencer::new());

    let query = location
        .map(|location| ListQuery::from_query_string(location.query_str()))
        .unwrap_or_default();

    {
        let products = products.clone();
        let toasts = toasts.clone();
        let sequencer = (*sequencer).clone();
        use_effect_with((query.page, token.clone(), *revision), move |(page, token, _)| {
            if let Some(token) = token.clone() {
                let page = *page;
                let ticket = sequencer.issue();
                spawn_local(async move {
                    let result = GoSchoolClient::shared().list_products(&token, page).await;
                    if !sequencer.is_current(ticket) {
                        debug!("dropping superseded product list response");
                        return;
                    }
                    match result {
                        Ok(list) => {
                            if !list.is_consistent() {
                                warn!("product page {page} does not match its paginator counts");
                            }
                            products.set(list);
                        }
                        Err(err) => notify_api_error(&toasts, &err, "Failed to fetch products."),
                    }
                });
            }
            || ()
        });
    }

    let on_title = text_input(&draft, |draft, value| draft.title = value);
    let on_description = text_input(&draft, |draft, value| draft.description = value);
    let on_cost = text_input(&draft, |draft, value| draft.cost = value);
    let on_image = {
        let draft = draft.clone();
        Callback::from(move |url: Option<String>| {
            let mut current = (*draft).clone();
            current.banner_image = url;
            draft.set(current);
        })
    };

    let onsubmit = {
        let draft = draft.clone();
        let token = token.clone();
        let toasts = toasts.clone();
        let revision = revision.clone();
        let default_image = config.default_image().to_string();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let Some(token) = token.clone() else {
                return;
            };
            let product = match draft.to_product() {
                Ok(product) => product,
                Err(message) => {
                    notify_error(&toasts, message);
                    return;
                }
            };
            let draft = draft.clone();
            let toasts = toasts.clone();
            let revision = revision.clone();
            let default_image = default_image.clone();
            spawn_local(async move {
                let client = GoSchoolClient::shared();
                let result = match product.id {
                    Some(id) => client.update_product(&token, id, &product).await,
                    None => client.create_product(&token, &product).await,
                };
                match result {
                    Ok(message) => {
                        notify_success(&toasts, message.unwrap_or_else(|| "Product saved".to_string()));
                        draft.set(ProductDraft::blank(&default_image));
                        revision.dispatch(());
                    }
                    Err(err) => notify_api_error(&toasts, &err, "Failed to save product."),
                }
            });
        })
    };

    let rows = products.data.iter().enumerate().map(|(index, product)| {
        let on_edit = {
            let draft = draft.clone();
            let product = product.clone();
            Callback::from(move |_: MouseEvent| draft.set(ProductDraft::edit(&product)))
        };
        let on_delete = {
            let token = token.clone();
            let toasts = toasts.clone();
            let revision = revision.clone();
            let id = product.id;
            Callback::from(move |_: MouseEvent| {
                let (Some(id), Some(token)) = (id, token.clone()) else {
                    return;
                };
                let confirmed = web_sys::window()
                    .and_then(|window| {
                        window
                            .confirm_with_message("Are you sure? You won't be able to revert this!")
                            .ok()
                    })
                    .unwrap_or(false);
                if !confirmed {
                    return;
                }
                let toasts = toasts.clone();
                let revision = revision.clone();
                spawn_local(async move {
                    match GoSchoolClient::shared().delete_product(&token, id).await {
                        Ok(message) => {
                            notify_success(&toasts, message.unwrap_or_else(|| "Product deleted".to_string()));
                            revision.dispatch(());
                        }
                        Err(err) => notify_api_error(&toasts, &err, "Failed to delete product."),
                    }
                });
            })
        };
        let banner = product.banner().map_or_else(
            || html! { <span>{"No Image"}</span> },
            |src| html! { <img src={src.to_string()} alt="Product" class="h-[50px] w-[50px] object-cover" /> },
        );
        let key = product.id.map_or_else(|| format!("row-{index}"), |id| id.to_string());

        html! {
            <tr {key}>
                <td class={CELL}>{ product.id.map(|id| id.to_string()).unwrap_or_default() }</td>
                <td class={CELL}>{ &product.title }</td>
                <td class={CELL}>{ banner }</td>
                <td class={CELL}>{ product.display_cost() }</td>
                <td class={CELL}>
                    <button class="mr-2 rounded bg-yellow-500 px-3 py-1 text-white hover:bg-yellow-600" onclick={on_edit}>{"Edit"}</button>
                    <button class="rounded bg-red-500 px-3 py-1 text-white hover:bg-red-600" onclick={on_delete}>{"Delete"}</button>
                </td>
            </tr>
        }
    });

    let verb = if draft.is_editing() { "Update" } else { "Add" };

    html! {
        <div class="flex flex-col items-center justify-center bg-gray-100 px-6 py-6">
            <div class="grid grid-cols-1 gap-6 md:grid-cols-2">
                <div class="rounded-lg bg-white p-6 shadow-md">
                    <h4 class="mb-4 text-lg font-bold">{ format!("{} Product", if draft.is_editing() { "Edit" } else { "Add" }) }</h4>
                    <form {onsubmit}>
                        <input class={INPUT} name="title" value={draft.title.clone()} oninput={on_title} placeholder="Title" required=true />
                        <input class={INPUT} name="description" value={draft.description.clone()} oninput={on_description} placeholder="Description" required=true />
                        <input class={INPUT} name="cost" type="number" step="0.01" min="0" value={draft.cost.clone()} oninput={on_cost} placeholder="Cost" required=true />
                        <ImageUpload
                            image={draft.banner_image.clone().map(AttrValue::from)}
                            preset={PRODUCT_PRESET}
                            on_change={on_image}
                        />
                        <button type="submit" class="w-full rounded bg-indigo-500 py-2 text-white hover:bg-indigo-600">
                            { format!("{verb} Product") }
                        </button>
                    </form>
                </div>
                <div class="rounded-lg bg-white p-6 shadow-md">
                    <table class="w-full border-collapse border border-gray-300">
                        <thead>
                            <tr class="bg-gray-100">
                                <th class={CELL}>{"ID"}</th>
                                <th class={CELL}>{"Title"}</th>
                                <th class={CELL}>{"Banner"}</th>
                                <th class={CELL}>{"Cost"}</th>
                                <th class={CELL}>{"Actions"}</th>
                            </tr>
                        </thead>
                        <tbody>{ for rows }</tbody>
                    </table>
                </div>
            </div>
            <div class="container mx-auto mt-4 bg-gray-100">
                <PaginationLinks<Product> route={Route::Dashboard} paginator={(*products).clone()} state={query} />
            </div>
        </div>
    }
}
