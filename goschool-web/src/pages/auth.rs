use shared::models::RegisterRequest;
use shared::session::validate_registration;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yewdux::prelude::use_dispatch;

use crate::models::toasts::{Toasts, notify_error};
use crate::session::use_session;

const INPUT: &str = "mb-3 w-full rounded border border-gray-300 p-2 focus:outline-none focus:ring-2 focus:ring-indigo-500";

#[derive(Debug, Clone, Default, PartialEq)]
struct Credentials {
    name: String,
    email: String,
    password: String,
    password_confirmation: String,
}

impl Credentials {
    fn registration(&self) -> RegisterRequest {
        RegisterRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            password_confirmation: self.password_confirmation.clone(),
        }
    }
}

fn field(form: &UseStateHandle<Credentials>, apply: fn(&mut Credentials, String)) -> Callback<InputEvent> {
    let form = form.clone();
    Callback::from(move |event: InputEvent| {
        let input: HtmlInputElement = event.target_unchecked_into();
        let mut current = (*form).clone();
        apply(&mut current, input.value());
        form.set(current);
    })
}

/// Login and registration behind one toggle.
#[function_component(AuthPage)]
pub fn auth_page() -> Html {
    let session = use_session();
    let toasts = use_dispatch::<Toasts>();
    let is_login = use_state(|| true);
    let form = use_state(Credentials::default);

    let onsubmit = {
        let form = form.clone();
        let is_login = is_login.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let Some(session) = &session else {
                return;
            };
            if *is_login {
                session.login(form.email.clone(), form.password.clone());
                return;
            }
            let request = form.registration();
            match validate_registration(&request) {
                Ok(()) => session.register(request),
                Err(message) => notify_error(&toasts, message),
            }
        })
    };
    let toggle = {
        let is_login = is_login.clone();
        Callback::from(move |_: MouseEvent| is_login.set(!*is_login))
    };

    let title = if *is_login { "Login" } else { "Register" };
    let (prompt, switch_to) = if *is_login {
        ("Don't have an account?", "Register")
    } else {
        ("Already have an account?", "Login")
    };

    html! {
        <div class="flex items-center justify-center bg-gray-100" style="height: calc(100vh - 60px)">
            <div class="w-[400px] rounded-lg bg-white p-6 shadow-md">
                <h3 class="mb-4 text-center text-xl font-bold">{ title }</h3>
                <form {onsubmit}>
                    if !*is_login {
                        <input class={INPUT} name="name" type="text" placeholder="Name" required=true
                            value={form.name.clone()} oninput={field(&form, |form, value| form.name = value)} />
                    }
                    <input class={INPUT} name="email" type="email" placeholder="Email" required=true
                        value={form.email.clone()} oninput={field(&form, |form, value| form.email = value)} />
                    <input class={INPUT} name="password" type="password" placeholder="Password" required=true
                        value={form.password.clone()} oninput={field(&form, |form, value| form.password = value)} />
                    if !*is_login {
                        <input class={INPUT} name="password_confirmation" type="password" placeholder="Confirm Password" required=true
                            value={form.password_confirmation.clone()}
                            oninput={field(&form, |form, value| form.password_confirmation = value)} />
                    }
                    <button type="submit" class="w-full rounded bg-indigo-500 py-2 text-white hover:bg-indigo-600">{ title }</button>
                </form>
                <p class="mt-4 text-center text-gray-600">
                    { prompt }{" "}
                    <span class="cursor-pointer text-indigo-500" onclick={toggle}>{ switch_to }</span>
                </p>
            </div>
        </div>
    }
}
