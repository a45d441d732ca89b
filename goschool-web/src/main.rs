mod api;
mod app;
mod assets;
mod components;
mod config;
mod containers;
mod map;
mod models;
mod pages;
mod routes;
mod session;

#[cfg(test)]
mod api_test;

use app::App;
use config::FrontendConfig;
use log::info;
use yew::Renderer;

fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(FrontendConfig::new().log_level));

    info!("Starting goSchool.uk");

    let root = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.body());
    match root {
        Some(body) => {
            Renderer::<App>::with_root(body.into()).render();
        }
        None => {
            Renderer::<App>::new().render();
        }
    }
}
