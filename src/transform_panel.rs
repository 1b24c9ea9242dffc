use yew::prelude::*;
use crate::frame::{Channel, ChannelValue, Frame};
use crate::mover::StyleSize;
use crate::types::ROOM_SIZE;

#[derive(Properties, PartialEq)]
pub struct TransformPanelProps {
    pub selected: Option<String>,
    pub frame: Option<Frame>,
    #[prop_or_default]
    pub size: StyleSize,
}

fn format_value(channel: Channel, value: &ChannelValue) -> String {
    match (channel, value) {
        (Channel::Matrix3d, ChannelValue::Matrix(m)) => m
            .to_cols_array()
            .iter()
            .map(|v| format!("{:.3}", v))
            .collect::<Vec<_>>()
            .join(" "),
        (_, value) => value.to_string(),
    }
}

/// Read-out of the selected room's transform channels.
#[function_component(TransformPanel)]
pub fn transform_panel(props: &TransformPanelProps) -> Html {
    let (Some(selected), Some(frame)) = (props.selected.as_ref(), props.frame.as_ref()) else {
        return html! {
            <div class="w-64 flex-none bg-white border-l border-gray-300 p-4 overflow-y-auto">
                <h2 class="text-lg font-semibold pb-3 mb-4 border-b border-gray-200">{"Transform"}</h2>
                <p class="text-sm text-gray-500">{"Select a room to see its transform"}</p>
            </div>
        };
    };

    let rows: Html = frame
        .channels()
        .map(|(channel, value)| {
            html! {
                <div key={channel.alias()} class="flex justify-between gap-2 text-sm">
                    <span class="text-gray-500">{channel.css_function()}</span>
                    <span class="font-mono text-gray-900 break-all text-right">{format_value(*channel, value)}</span>
                </div>
            }
        })
        .collect();

    let width = props.size.width.unwrap_or(ROOM_SIZE);
    let height = props.size.height.unwrap_or(ROOM_SIZE);

    html! {
        <div class="w-64 flex-none bg-white border-l border-gray-300 p-4 overflow-y-auto">
            <h2 class="text-lg font-semibold pb-3 mb-4 border-b border-gray-200">{"Transform"}</h2>
            <div class="space-y-4">
                <p class="text-xs text-gray-500 font-mono">{selected}</p>
                <div class="space-y-1">{rows}</div>
                <div>
                    <label class="block text-sm font-medium text-gray-700 mb-1">{"Dimensions"}</label>
                    <p class="text-sm font-mono text-gray-900">{format!("{} x {}", width, height)}</p>
                </div>
            </div>
        </div>
    }
}
