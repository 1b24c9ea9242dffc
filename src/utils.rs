use glam::DVec2;
use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, MouseEvent, SvgsvgElement, TouchEvent};
use yew::NodeRef;

use crate::config::ViewBoxSpecs;

/// Attribute carrying a shape's identifier.
pub const TARGET_ATTRIBUTE: &str = "data-target";

/// Maps a client point into view-box units for an SVG laid out at `rect_origin` with
/// `rect_size`, honoring the default `preserveAspectRatio="xMidYMid meet"`.
pub fn map_client_to_view_box(
    client: DVec2,
    rect_origin: DVec2,
    rect_size: DVec2,
    view_box: &ViewBoxSpecs,
) -> DVec2 {
    let min = DVec2::new(view_box.min_x, view_box.min_y);
    let scale = (rect_size.x / view_box.width).min(rect_size.y / view_box.height);
    if !scale.is_finite() || scale <= 0.0 {
        return min + (client - rect_origin);
    }

    let content = DVec2::new(view_box.width, view_box.height) * scale;
    let padding = (rect_size - content) / 2.0;
    min + (client - rect_origin - padding) / scale
}

pub fn client_to_svg_coords(client: DVec2, svg_element: &SvgsvgElement, view_box: &ViewBoxSpecs) -> DVec2 {
    let rect = svg_element.get_bounding_client_rect();
    map_client_to_view_box(
        client,
        DVec2::new(rect.left(), rect.top()),
        DVec2::new(rect.width(), rect.height()),
        view_box,
    )
}

/// Canvas position of a client point, if the SVG is mounted.
pub fn canvas_point(svg_ref: &NodeRef, view_box: &ViewBoxSpecs, client: DVec2) -> Option<DVec2> {
    let svg = svg_ref.cast::<SvgsvgElement>()?;
    Some(client_to_svg_coords(client, &svg, view_box))
}

/// The `data-target` identifier of an event target, if it has one.
pub fn target_id(target: Option<EventTarget>) -> Option<String> {
    let element = target?.dyn_into::<Element>().ok()?;
    element.get_attribute(TARGET_ATTRIBUTE)
}

pub fn mouse_client_point(event: &MouseEvent) -> DVec2 {
    DVec2::new(event.client_x() as f64, event.client_y() as f64)
}

/// First active touch, falling back to the touches that just ended.
pub fn touch_client_point(event: &TouchEvent) -> Option<DVec2> {
    let touch = event
        .touches()
        .get(0)
        .or_else(|| event.changed_touches().get(0))?;
    Some(DVec2::new(touch.client_x() as f64, touch.client_y() as f64))
}

pub fn event_client_point(event: &Event) -> Option<DVec2> {
    if let Some(mouse_event) = event.dyn_ref::<MouseEvent>() {
        return Some(mouse_client_point(mouse_event));
    }
    event.dyn_ref::<TouchEvent>().and_then(touch_client_point)
}

/// Non-passive `touchstart` listener on `target`. Cancelling the touch stops the browser
/// from following a tap with emulated mouse events, so a press is handled once.
pub fn touchstart_listener<F>(target: &EventTarget, mut callback: F) -> EventListener
where
    F: FnMut(&Event) + 'static,
{
    EventListener::new_with_options(
        target,
        "touchstart",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            event.prevent_default();
            callback(event);
        },
    )
}
