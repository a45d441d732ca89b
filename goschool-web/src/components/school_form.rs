use shared::models::{SchoolDraft, SchoolField};
use shared::upload::SCHOOL_PRESET;
use strum::IntoEnumIterator;
use yew::prelude::*;

use crate::components::image_upload::ImageUpload;
use crate::components::input_with_label::InputWithLabel;

#[derive(Properties, PartialEq)]
pub struct SchoolFormProps {
    pub draft: SchoolDraft,
    pub on_field: Callback<(SchoolField, String)>,
    pub on_image: Callback<Option<String>>,
    pub on_submit: Callback<()>,
    pub on_cancel: Callback<()>,
}

/// Modal add/edit form for a school.
#[function_component(SchoolForm)]
pub fn school_form(props: &SchoolFormProps) -> Html {
    let verb = if props.draft.editing { "Update" } else { "Add" };
    let onsubmit = props.on_submit.reform(|event: SubmitEvent| event.prevent_default());
    let on_cancel = props.on_cancel.reform(|_: MouseEvent| ());

    let fields = SchoolField::iter().map(|field| {
        let on_change = props.on_field.reform(move |value: String| (field, value));
        html! {
            <InputWithLabel
                label={field.label()}
                name={field.name()}
                value={field.get(&props.draft.school).to_string()}
                placeholder={field.placeholder()}
                required={field.required()}
                {on_change}
            />
        }
    });

    html! {
        <div class="fixed inset-0 z-50 flex items-center justify-center bg-black bg-opacity-50" role="dialog" aria-modal="true" aria-labelledby="school-form-title">
            <div class="max-h-[90vh] w-[400px] overflow-y-auto rounded-lg bg-white p-6 shadow-md">
                <h4 id="school-form-title" class="mb-4 text-lg font-bold">{ format!("{} School", if props.draft.editing { "Edit" } else { "Add" }) }</h4>
                <form {onsubmit}>
                    <ImageUpload
                        image={props.draft.school.featured_image.clone().map(AttrValue::from)}
                        preset={SCHOOL_PRESET}
                        on_change={props.on_image.clone()}
                    />
                    { for fields }
                    <div class="mt-6 flex justify-between">
                        <button type="submit" class="rounded bg-indigo-500 px-4 py-2 text-white hover:bg-indigo-600">{ format!("{verb} School") }</button>
                        <button type="button" class="rounded bg-gray-200 px-4 py-2 hover:bg-gray-300" onclick={on_cancel}>{"Cancel"}</button>
                    </div>
                </form>
            </div>
        </div>
    }
}
