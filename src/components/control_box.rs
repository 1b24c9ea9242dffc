use glam::DVec2;
use yew::prelude::*;

use crate::gesture::GestureKind;
use crate::mover::ControlGeometry;
use crate::types::{ControlMode, HandleName};
use crate::utils::{mouse_client_point, touch_client_point};

const HANDLE_SIZE: f64 = 8.0;
const EDGE_HANDLE_SIZE: f64 = 6.0;
const ROTATION_HANDLE_RADIUS: f64 = 5.0;
const CONTROL_COLOR: &str = "#0d99ff";

/// Props for the control box drawn around the selected room
#[derive(Properties, Clone, PartialEq)]
pub struct ControlBoxProps {
    pub geometry: ControlGeometry,

    pub mode: ControlMode,

    #[prop_or(true)]
    pub rotatable: bool,

    /// Draw a marker on the transform origin
    #[prop_or(true)]
    pub show_origin: bool,

    /// Pointer-down on a handle, with the client position of the pointer
    #[prop_or_default]
    pub on_handle_down: Callback<(GestureKind, DVec2)>,
}

fn press_callbacks(
    kind: GestureKind,
    on_handle_down: &Callback<(GestureKind, DVec2)>,
) -> (Callback<MouseEvent>, Callback<TouchEvent>) {
    let onmousedown = {
        let on_handle_down = on_handle_down.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            e.stop_propagation();
            on_handle_down.emit((kind, mouse_client_point(&e)));
        })
    };
    let ontouchstart = {
        let on_handle_down = on_handle_down.clone();
        // The canvas listener already cancelled this touch.
        Callback::from(move |e: TouchEvent| {
            e.stop_propagation();
            if let Some(point) = touch_client_point(&e) {
                on_handle_down.emit((kind, point));
            }
        })
    };
    (onmousedown, ontouchstart)
}

/// Outline, handles and rotation knob over the selection.
/// Rendered inside the canvas SVG so it shares the view-box coordinates.
#[function_component(ControlBox)]
pub fn control_box(props: &ControlBoxProps) -> Html {
    let geometry = &props.geometry;

    let handles: Vec<(HandleName, GestureKind)> = match props.mode {
        ControlMode::Scale => HandleName::ALL
            .iter()
            .map(|h| (*h, GestureKind::Scale(*h)))
            .collect(),
        ControlMode::Resize => HandleName::ALL
            .iter()
            .map(|h| (*h, GestureKind::Resize(*h)))
            .collect(),
        ControlMode::Warp => HandleName::CORNERS
            .iter()
            .map(|h| (*h, GestureKind::Warp(*h)))
            .collect(),
    };

    let handle_elements: Html = handles
        .into_iter()
        .map(|(handle, kind)| {
            let pos = geometry.handle_position(handle);
            let size = if handle.is_corner() {
                HANDLE_SIZE
            } else {
                EDGE_HANDLE_SIZE
            };
            let half = size / 2.0;
            let cursor = if props.mode == ControlMode::Warp {
                "crosshair"
            } else {
                handle.cursor()
            };
            let (onmousedown, ontouchstart) = press_callbacks(kind, &props.on_handle_down);

            html! {
                <rect
                    key={handle.to_kebab_case()}
                    x={format!("{}", pos.x - half)}
                    y={format!("{}", pos.y - half)}
                    width={format!("{}", size)}
                    height={format!("{}", size)}
                    fill="white"
                    stroke={CONTROL_COLOR}
                    stroke-width="1"
                    style={format!("cursor: {}; pointer-events: all;", cursor)}
                    {onmousedown}
                    {ontouchstart}
                />
            }
        })
        .collect();

    let outline = geometry
        .corners
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ");

    let rotation_element = if props.rotatable {
        let top = geometry.handle_position(HandleName::Top);
        let knob = geometry.rotation_handle;
        let (onmousedown, ontouchstart) = press_callbacks(GestureKind::Rotate, &props.on_handle_down);
        html! {
            <>
                <line
                    x1={format!("{}", top.x)}
                    y1={format!("{}", top.y)}
                    x2={format!("{}", knob.x)}
                    y2={format!("{}", knob.y)}
                    stroke={CONTROL_COLOR}
                    stroke-width="1"
                />
                <circle
                    cx={format!("{}", knob.x)}
                    cy={format!("{}", knob.y)}
                    r={format!("{}", ROTATION_HANDLE_RADIUS)}
                    fill="white"
                    stroke={CONTROL_COLOR}
                    stroke-width="1"
                    style="cursor: grab; pointer-events: all;"
                    {onmousedown}
                    {ontouchstart}
                />
            </>
        }
    } else {
        html! {}
    };

    let origin_element = if props.show_origin {
        html! {
            <circle
                cx={format!("{}", geometry.center.x)}
                cy={format!("{}", geometry.center.y)}
                r="3"
                fill="none"
                stroke="#ff4444"
                stroke-width="1"
            />
        }
    } else {
        html! {}
    };

    html! {
        <g class="control-box" style="pointer-events: none;">
            <polygon
                points={outline}
                fill="none"
                stroke={CONTROL_COLOR}
                stroke-width="1"
            />
            {rotation_element}
            {handle_elements}
            {origin_element}
        </g>
    }
}
