use std::rc::Rc;

use glam::DVec2;
use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::Event;
use yew::prelude::*;

use crate::components::ControlBox;
use crate::config::{MoverOptions, ViewBoxSpecs};
use crate::gesture::GestureKind;
use crate::mover::{MoverState, SelectOutcome};
use crate::rooms_panel::RoomsPanel;
use crate::transform_panel::TransformPanel;
use crate::types::{ControlMode, ROOM_OFFSET, ROOM_SIZE};
use crate::utils::{
    canvas_point, event_client_point, mouse_client_point, target_id, touch_client_point, touchstart_listener,
};

const MODES: [ControlMode; 3] = [ControlMode::Scale, ControlMode::Resize, ControlMode::Warp];

#[derive(Properties, PartialEq)]
pub struct MoverProps {
    pub view_box: ViewBoxSpecs,
    #[prop_or_default]
    pub options: MoverOptions,
}

/// Room-layout editor: an SVG canvas of rooms with a control box on the selected one.
#[function_component(Mover)]
pub fn mover(props: &MoverProps) -> Html {
    let state = {
        let options = props.options.clone();
        use_mut_ref(move || MoverState::new(options))
    };
    let force_update = use_force_update();
    let is_tracking = use_state(|| false);
    let svg_ref = use_node_ref();
    let canvas_ref = use_node_ref();

    // Escape clears the selection
    {
        let state = state.clone();
        let force_update = force_update.clone();
        use_effect_with((), move |_| {
            let document = gloo_utils::document();
            let listener = EventListener::new(&document, "keydown", move |event| {
                if let Some(keyboard_event) = event.dyn_ref::<web_sys::KeyboardEvent>() {
                    if keyboard_event.key() == "Escape" && state.borrow_mut().deselect() {
                        force_update.force_update();
                    }
                }
            });

            move || drop(listener)
        });
    }

    let on_add_room = {
        let state = state.clone();
        let force_update = force_update.clone();
        Callback::from(move |_: MouseEvent| {
            state.borrow_mut().add_room();
            force_update.force_update();
        })
    };

    // Select + drag for a press that landed on `target`
    let press = {
        let state = state.clone();
        let is_tracking = is_tracking.clone();
        let force_update = force_update.clone();
        let svg_ref = svg_ref.clone();
        let view_box = props.view_box;
        Rc::new(move |target: Option<web_sys::EventTarget>, client: Option<DVec2>| {
            let Some(id) = target_id(target) else {
                return;
            };
            let Some(point) = client.and_then(|c| canvas_point(&svg_ref, &view_box, c)) else {
                return;
            };
            let outcome = state.borrow_mut().press(Some(&id), point);
            if outcome == SelectOutcome::Ignored {
                return;
            }
            if state.borrow().is_gesturing() {
                is_tracking.set(true);
            }
            force_update.force_update();
        })
    };

    let on_canvas_mousedown = {
        let press = press.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            press(e.target(), Some(mouse_client_point(&e)));
        })
    };

    // Yew registers touchstart as passive, so the canvas gets its own listener
    {
        let press = press.clone();
        let canvas_ref = canvas_ref.clone();
        use_effect_with(props.view_box, move |_| {
            let listener = canvas_ref.get().map(|canvas| {
                touchstart_listener(&canvas, move |event| {
                    if let Some(touch_event) = event.dyn_ref::<web_sys::TouchEvent>() {
                        press(event.target(), touch_client_point(touch_event));
                    }
                })
            });

            move || drop(listener)
        });
    }

    let on_handle_down = {
        let state = state.clone();
        let is_tracking = is_tracking.clone();
        let svg_ref = svg_ref.clone();
        let view_box = props.view_box;
        Callback::from(move |(kind, client): (GestureKind, DVec2)| {
            let Some(point) = canvas_point(&svg_ref, &view_box, client) else {
                return;
            };
            if state.borrow_mut().begin_gesture(kind, point) {
                is_tracking.set(true);
            }
        })
    };

    let on_select_room = {
        let state = state.clone();
        let force_update = force_update.clone();
        Callback::from(move |id: String| {
            state.borrow_mut().select(&id);
            force_update.force_update();
        })
    };

    // Window-level listeners while a gesture is running
    {
        let state = state.clone();
        let is_tracking = is_tracking.clone();
        let force_update = force_update.clone();
        let svg_ref = svg_ref.clone();
        let view_box = props.view_box;

        use_effect_with(*is_tracking, move |tracking| -> Box<dyn FnOnce()> {
            if !*tracking {
                return Box::new(|| ());
            }

            let window = gloo_utils::window();

            let on_move: Rc<dyn Fn(&Event)> = {
                let state = state.clone();
                Rc::new(move |event: &Event| {
                    let Some(client) = event_client_point(event) else {
                        return;
                    };
                    let Some(point) = canvas_point(&svg_ref, &view_box, client) else {
                        return;
                    };
                    if state.borrow_mut().update_gesture(point).is_some() {
                        force_update.force_update();
                    }
                })
            };

            let on_end: Rc<dyn Fn(&Event)> = Rc::new(move |_event: &Event| {
                state.borrow_mut().end_gesture();
                is_tracking.set(false);
            });

            let mousemove_listener = {
                let on_move = on_move.clone();
                EventListener::new(&window, "mousemove", move |event| on_move(event))
            };
            let touchmove_listener = EventListener::new_with_options(
                &window,
                "touchmove",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    event.prevent_default();
                    on_move(event);
                },
            );
            let end_listeners: Vec<EventListener> = ["mouseup", "touchend", "touchcancel"]
                .into_iter()
                .map(|event_type| {
                    let on_end = on_end.clone();
                    EventListener::new(&window, event_type, move |event| on_end(event))
                })
                .collect();

            Box::new(move || {
                drop(mousemove_listener);
                drop(touchmove_listener);
                drop(end_listeners);
            })
        });
    }

    let state_ref = state.borrow();
    let options = state_ref.options();

    let room_elements: Html = state_ref
        .rooms()
        .iter()
        .map(|room| {
            let target = room.target_id();
            let style = state_ref.element_style(&target);
            html! {
                <g key={room.id} style={format!("transform: translate({}px, {}px)", ROOM_OFFSET.x, ROOM_OFFSET.y)}>
                    <rect
                        data-target={target}
                        x="0"
                        y="0"
                        width={format!("{}px", ROOM_SIZE)}
                        height={format!("{}px", ROOM_SIZE)}
                        fill="red"
                        style={format!("cursor: move; {}", style)}
                    />
                </g>
            }
        })
        .collect();

    let controls = match state_ref.control_geometry() {
        Some(geometry) => html! {
            <ControlBox
                {geometry}
                mode={state_ref.mode()}
                rotatable={options.rotatable}
                show_origin={options.show_origin}
                on_handle_down={on_handle_down}
            />
        },
        None => html! {},
    };

    let mode_buttons: Html = MODES
        .iter()
        .map(|mode| {
            let mode = *mode;
            let is_active = state_ref.mode() == mode;
            let onclick = {
                let state = state.clone();
                let force_update = force_update.clone();
                Callback::from(move |_: MouseEvent| {
                    state.borrow_mut().set_mode(mode);
                    force_update.force_update();
                })
            };
            html! {
                <button
                    key={mode.label()}
                    {onclick}
                    class={classes!(
                        "px-3",
                        "py-1",
                        "text-sm",
                        "rounded",
                        "border",
                        if is_active { "bg-blue-100 border-blue-300" } else { "bg-white border-gray-300 hover:bg-gray-100" }
                    )}
                >
                    {mode.label()}
                </button>
            }
        })
        .collect();

    let selected = state_ref.target().map(str::to_string);
    let selected_frame = state_ref.selected_frame().cloned();
    let selected_size = selected
        .as_deref()
        .map(|id| state_ref.style_size(id))
        .unwrap_or_default();

    html! {
        <div class="flex h-screen bg-gray-50">
            <RoomsPanel
                rooms={state_ref.rooms().to_vec()}
                selected={selected.clone()}
                on_select={on_select_room}
            />
            <div class="flex-1 flex flex-col">
                <div class="flex items-center gap-2 p-2 border-b border-gray-300 bg-white">
                    <button
                        onclick={on_add_room}
                        class="px-3 py-1 text-sm rounded border border-blue-500 text-blue-600 hover:bg-blue-50"
                    >
                        {"Add a Room"}
                    </button>
                    <div class="flex gap-1 ml-4">{mode_buttons}</div>
                </div>
                <div
                    class="App flex-1 relative overflow-hidden"
                    ref={canvas_ref}
                    onmousedown={on_canvas_mousedown}
                >
                    <svg
                        ref={svg_ref}
                        viewBox={props.view_box.description()}
                        class="w-full h-full"
                    >
                        {room_elements}
                        {controls}
                    </svg>
                </div>
            </div>
            <TransformPanel
                {selected}
                frame={selected_frame}
                size={selected_size}
            />
        </div>
    }
}
