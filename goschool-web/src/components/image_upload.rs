use shared::upload::{ImageUpload as Picker, UploadTarget, upload_image};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yewdux::prelude::use_dispatch;

use crate::assets::CloudinaryHost;
use crate::config::FrontendConfig;
use crate::models::toasts::{Toasts, notify_error};

#[derive(Properties, PartialEq)]
pub struct ImageUploadProps {
    /// Image currently held by the form.
    #[prop_or_default]
    pub image: Option<AttrValue>,
    pub preset: AttrValue,
    /// Receives the uploaded URL, or `None` after a revert.
    pub on_change: Callback<Option<String>>,
}

#[function_component(ImageUpload)]
pub fn image_upload(props: &ImageUploadProps) -> Html {
    let config = use_memo((), |_| FrontendConfig::new());
    let toasts = use_dispatch::<Toasts>();
    let picker = {
        let initial = props.image.clone();
        let default_image = config.default_image().to_string();
        use_mut_ref(move || Picker::new(initial.as_deref(), &default_image))
    };
    let uploading = use_state(|| false);
    let force_update = use_force_update();

    {
        let picker = picker.clone();
        let force_update = force_update.clone();
        use_effect_with(props.image.clone(), move |image| {
            picker.borrow_mut().follow(image.as_deref());
            force_update.force_update();
            || ()
        });
    }

    let onchange = {
        let picker = picker.clone();
        let uploading = uploading.clone();
        let on_change = props.on_change.clone();
        let target = UploadTarget::new(props.preset.to_string());
        let host = CloudinaryHost::from_config(&config);
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            // Sizes are whole bytes, well inside f64's exact range.
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let size = file.size() as u64;
            let selected = picker.borrow_mut().select(size);
            force_update.force_update();
            if selected.is_err() {
                return;
            }

            uploading.set(true);
            let picker = picker.clone();
            let uploading = uploading.clone();
            let on_change = on_change.clone();
            let toasts = toasts.clone();
            let target = target.clone();
            let host = host.clone();
            let force_update = force_update.clone();
            spawn_local(async move {
                match upload_image(&host, file, size, &target).await {
                    Ok(url) => {
                        let reported = picker.borrow_mut().accept(url);
                        on_change.emit(reported);
                    }
                    Err(err) => {
                        log::error!("image upload failed: {err}");
                        notify_error(&toasts, err.user_message());
                    }
                }
                uploading.set(false);
                force_update.force_update();
            });
        })
    };

    let on_revert = {
        let picker = picker.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |_: MouseEvent| {
            let reported = picker.borrow_mut().revert();
            on_change.emit(reported);
        })
    };

    let state = picker.borrow();
    let label_class = if state.is_oversized() {
        "mb-1 block text-sm font-medium text-red-600"
    } else {
        "mb-1 block text-sm font-medium"
    };

    html! {
        <div class="mb-4">
            <label class={label_class}>{ state.label() }</label>
            <img src={state.preview().to_string()} alt="Preview" class="mb-2 h-32 w-full rounded object-cover" />
            <input type="file" accept="image/*" {onchange} disabled={*uploading} class="w-full text-sm" />
            if *uploading {
                <p class="mt-1 text-sm text-gray-500">{"Uploading..."}</p>
            }
            if state.can_revert() {
                <button type="button" class="mt-2 rounded bg-gray-200 px-3 py-1 text-sm hover:bg-gray-300" onclick={on_revert}>
                    {"Revert"}
                </button>
            }
        </div>
    }
}
