mod app;
mod components;
mod mover_canvas;
mod rooms_panel;
mod transform_panel;
mod utils;

pub mod config;
pub mod frame;
pub mod gesture;
pub mod mover;
pub mod types;

use app::App;
use wasm_bindgen::prelude::*;

pub use utils::{target_id, touchstart_listener};

#[wasm_bindgen(start)]
pub fn run_app() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
