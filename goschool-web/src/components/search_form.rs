use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SearchFormProps {
    pub on_search: Callback<String>,
    /// Query the box starts with, e.g. the one in the URL.
    #[prop_or_default]
    pub initial: Option<AttrValue>,
}

#[function_component(SearchForm)]
pub fn search_form(props: &SearchFormProps) -> Html {
    let query = use_state(|| {
        props
            .initial
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    });

    let oninput = {
        let query = query.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            query.set(input.value());
        })
    };
    let onsubmit = {
        let query = query.clone();
        let on_search = props.on_search.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            on_search.emit((*query).clone());
        })
    };

    html! {
        <form class="flex items-center space-x-4" {onsubmit}>
            <input
                type="text"
                name="search"
                value={(*query).clone()}
                placeholder="Search..."
                class="w-full rounded border border-gray-300 px-4 py-2"
                {oninput}
            />
            <button type="submit" class="rounded bg-blue-500 px-4 py-2 text-white hover:bg-blue-600">
                {"Search"}
            </button>
        </form>
    }
}
