use yew::prelude::*;
use crate::types::Room;

#[derive(Properties, PartialEq)]
pub struct RoomsPanelProps {
    pub rooms: Vec<Room>,
    pub selected: Option<String>,
    pub on_select: Callback<String>,
}

#[function_component(RoomsPanel)]
pub fn rooms_panel(props: &RoomsPanelProps) -> Html {
    html! {
        <div class="w-64 flex-none bg-white border-r border-gray-300 p-4 overflow-y-auto">
            <h2 class="text-lg font-semibold pb-3 mb-4 border-b border-gray-200">{"Rooms"}</h2>
            if props.rooms.is_empty() {
                <p class="text-sm text-gray-500">{"No rooms yet"}</p>
            }
            <div class="space-y-2">
                {
                    props.rooms.iter().map(|room| {
                        let target = room.target_id();
                        let is_selected = props.selected.as_deref() == Some(target.as_str());
                        let on_select = props.on_select.clone();
                        let onclick = {
                            let target = target.clone();
                            Callback::from(move |_| {
                                on_select.emit(target.clone());
                            })
                        };

                        html! {
                            <div
                                key={room.id}
                                {onclick}
                                class={classes!(
                                    "flex",
                                    "items-center",
                                    "gap-2",
                                    "p-2",
                                    "rounded",
                                    "cursor-pointer",
                                    "border",
                                    "border-gray-200",
                                    "hover:bg-gray-100",
                                    "hover:border-gray-300",
                                    if is_selected { "bg-blue-100 border-blue-300" } else { "bg-white" }
                                )}
                            >
                                <div class="w-6 h-6 rounded border border-gray-300" style="background-color: red" />
                                <span class="text-sm">
                                    {format!("Room {}", room.id)}
                                </span>
                            </div>
                        }
                    }).collect::<Html>()
                }
            </div>
        </div>
    }
}
