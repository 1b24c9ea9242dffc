use yew::prelude::*;

use crate::config::AppConfig;
use crate::mover_canvas::Mover;

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| AppConfig::from_document());

    html! {
        <Mover view_box={config.view_box} options={config.options.clone()} />
    }
}
