use shared::notice::NoticeLevel;
use yew::prelude::*;
use yewdux::prelude::use_store;

use crate::models::toasts::Toasts;

#[function_component(Toaster)]
pub fn toaster() -> Html {
    let (toasts, dispatch) = use_store::<Toasts>();

    html! {
        <div class="fixed right-4 top-4 z-[100] flex flex-col gap-2">
            { for toasts.items.iter().map(|toast| {
                let id = toast.id;
                let dispatch = dispatch.clone();
                let dismiss = Callback::from(move |_: MouseEvent| {
                    dispatch.reduce_mut(|toasts| toasts.dismiss(id));
                });
                let class = match toast.notice.level {
                    NoticeLevel::Success => "bg-green-600",
                    NoticeLevel::Error => "bg-red-600",
                };
                html! {
                    <div key={id} role="status" class={classes!("flex", "items-center", "gap-3", "rounded", "px-4", "py-2", "text-white", "shadow-lg", class)}>
                        <span>{ &toast.notice.message }</span>
                        <button class="font-bold" onclick={dismiss}>{"×"}</button>
                    </div>
                }
            }) }
        </div>
    }
}
