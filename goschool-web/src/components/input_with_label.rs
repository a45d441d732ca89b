use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct InputWithLabelProps {
    pub label: AttrValue,
    pub name: AttrValue,
    pub value: AttrValue,
    pub on_change: Callback<String>,
    #[prop_or(AttrValue::Static("text"))]
    pub input_type: AttrValue,
    #[prop_or_default]
    pub placeholder: AttrValue,
    #[prop_or_default]
    pub required: bool,
    #[prop_or_default]
    pub step: Option<AttrValue>,
}

/// A labelled input reporting every edit as a string.
#[function_component(InputWithLabel)]
pub fn input_with_label(props: &InputWithLabelProps) -> Html {
    let oninput = {
        let on_change = props.on_change.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            on_change.emit(input.value());
        })
    };

    html! {
        <div class="mb-3">
            <label for={props.name.clone()} class="mb-1 block text-base font-medium">{ props.label.clone() }</label>
            <input
                id={props.name.clone()}
                name={props.name.clone()}
                type={props.input_type.clone()}
                value={props.value.clone()}
                placeholder={props.placeholder.clone()}
                required={props.required}
                step={props.step.clone()}
                class="w-full rounded border border-gray-300 p-2 focus:outline-none focus:ring-2 focus:ring-indigo-500"
                {oninput}
            />
        </div>
    }
}
