use std::collections::HashMap;
use std::fmt::Write;

use glam::{DMat4, DVec2};

use crate::config::MoverOptions;
use crate::frame::{project_point, Channel, ChannelValue, Frame};
use crate::gesture::{
    DragEvent, ElementGeometry, Gesture, GestureKind, GestureTracker, ResizeEvent, RotateEvent,
    ScaleEvent, WarpEvent,
};
use crate::types::{ControlMode, Dimensions, HandleName, Room, ROOM_OFFSET, ROOM_SIZE};

/// Distance of the rotation handle beyond the top edge of the control box.
pub const ROTATION_HANDLE_DISTANCE: f64 = 24.0;

/// Inline `width`/`height` set by resizing; unset axes keep the element's own size.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StyleSize {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// No usable identifier; nothing changed.
    Ignored,
    /// The element was already selected.
    Refreshed,
    /// The selection moved to a new element.
    Selected,
}

/// Control box of the selection in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlGeometry {
    /// Corners in [`HandleName::CORNERS`] order.
    pub corners: [DVec2; 4],
    pub center: DVec2,
    pub rotation_handle: DVec2,
}

impl ControlGeometry {
    pub fn handle_position(&self, handle: HandleName) -> DVec2 {
        let [tl, tr, br, bl] = self.corners;
        match handle {
            HandleName::TopLeft => tl,
            HandleName::TopRight => tr,
            HandleName::BottomRight => br,
            HandleName::BottomLeft => bl,
            HandleName::Top => (tl + tr) / 2.0,
            HandleName::Right => (tr + br) / 2.0,
            HandleName::Bottom => (br + bl) / 2.0,
            HandleName::Left => (bl + tl) / 2.0,
        }
    }
}

/// Rooms, the current selection, and the accumulated transform of every touched shape.
#[derive(Debug, Clone)]
pub struct MoverState {
    options: MoverOptions,
    mode: ControlMode,
    rooms: Vec<Room>,
    items: HashMap<String, Frame>,
    sizes: HashMap<String, StyleSize>,
    target: Option<String>,
    gesture: Option<GestureTracker>,
}

impl Default for MoverState {
    fn default() -> Self {
        Self::new(MoverOptions::default())
    }
}

impl MoverState {
    pub fn new(options: MoverOptions) -> Self {
        Self {
            mode: options.mode,
            options,
            rooms: Vec::new(),
            items: HashMap::new(),
            sizes: HashMap::new(),
            target: None,
            gesture: None,
        }
    }

    pub fn options(&self) -> &MoverOptions {
        &self.options
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ControlMode) {
        self.mode = mode;
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn frame(&self, id: &str) -> Option<&Frame> {
        self.items.get(id)
    }

    pub fn selected_frame(&self) -> Option<&Frame> {
        self.target.as_deref().and_then(|id| self.items.get(id))
    }

    pub fn style_size(&self, id: &str) -> StyleSize {
        self.sizes.get(id).copied().unwrap_or_default()
    }

    pub fn is_gesturing(&self) -> bool {
        self.gesture.is_some()
    }

    /// Appends a room whose id is one past the current count.
    pub fn add_room(&mut self) -> Room {
        let room = Room::new(self.rooms.len() as u32 + 1);
        self.rooms.push(room);
        log::debug!("added room {}", room.id);
        room
    }

    /// Selects the element carrying `id`, creating its transform state on first touch.
    pub fn select(&mut self, id: &str) -> SelectOutcome {
        if id.is_empty() {
            return SelectOutcome::Ignored;
        }

        self.items
            .entry(id.to_string())
            .or_insert_with(Frame::room_default);

        if self.target.as_deref() == Some(id) {
            SelectOutcome::Refreshed
        } else {
            log::debug!("selected {}", id);
            self.target = Some(id.to_string());
            SelectOutcome::Selected
        }
    }

    /// Pointer-down over an element: select it and start dragging from `pointer`.
    pub fn press(&mut self, id: Option<&str>, pointer: DVec2) -> SelectOutcome {
        let Some(id) = id else {
            return SelectOutcome::Ignored;
        };
        let outcome = self.select(id);
        if outcome != SelectOutcome::Ignored {
            self.begin_gesture(GestureKind::Drag, pointer);
        }
        outcome
    }

    pub fn deselect(&mut self) -> bool {
        self.gesture = None;
        self.target.take().is_some()
    }

    /// Untransformed placement of an element on the canvas.
    ///
    /// Rooms sit at [`ROOM_OFFSET`]. Any other identifier is placed at the canvas origin
    /// with the default room size, since the canvas only renders rooms.
    pub fn geometry(&self, id: &str) -> ElementGeometry {
        let offset = if Room::id_from_target(id).is_some() {
            ROOM_OFFSET
        } else {
            DVec2::ZERO
        };
        let size = self.style_size(id);
        ElementGeometry {
            offset,
            size: Dimensions::new(
                size.width.unwrap_or(ROOM_SIZE),
                size.height.unwrap_or(ROOM_SIZE),
            ),
        }
    }

    fn allows(&self, kind: GestureKind) -> bool {
        match kind {
            GestureKind::Drag => self.options.draggable,
            GestureKind::Rotate => self.options.rotatable,
            GestureKind::Scale(_) => self.mode == ControlMode::Scale,
            GestureKind::Resize(_) => self.mode == ControlMode::Resize,
            GestureKind::Warp(handle) => self.mode == ControlMode::Warp && handle.is_corner(),
        }
    }

    /// Starts tracking a gesture on the selection. Returns false when none can start.
    pub fn begin_gesture(&mut self, kind: GestureKind, pointer: DVec2) -> bool {
        if !self.allows(kind) {
            return false;
        }
        let Some(id) = self.target.as_deref() else {
            return false;
        };
        let Some(frame) = self.items.get(id) else {
            return false;
        };

        let tracker = GestureTracker::new(kind, pointer, frame, self.geometry(id), &self.options);
        log::debug!("{:?} started on {}", kind, id);
        self.gesture = Some(tracker);
        true
    }

    /// Feeds a pointer sample to the running gesture and applies what it reports.
    pub fn update_gesture(&mut self, pointer: DVec2) -> Option<Gesture> {
        let gesture = self.gesture.as_mut()?.update(pointer)?;
        self.apply(&gesture);
        Some(gesture)
    }

    pub fn end_gesture(&mut self) -> bool {
        match self.gesture.take() {
            Some(tracker) => {
                log::debug!("{:?} ended", tracker.kind());
                true
            }
            None => false,
        }
    }

    /// Applies a gesture event to the selection. Returns false when nothing is selected.
    pub fn apply(&mut self, gesture: &Gesture) -> bool {
        match gesture {
            Gesture::Drag(e) => self.on_drag(e),
            Gesture::Rotate(e) => self.on_rotate(e),
            Gesture::Scale(e) => self.on_scale(e),
            Gesture::Resize(e) => self.on_resize(e),
            Gesture::Warp(e) => self.on_warp(e),
        }
    }

    fn selected_item_mut(&mut self) -> Option<&mut Frame> {
        let id = self.target.as_deref()?;
        self.items.get_mut(id)
    }

    pub fn on_rotate(&mut self, e: &RotateEvent) -> bool {
        let Some(item) = self.selected_item_mut() else {
            return false;
        };
        let rotate = item.number(Channel::Rotate).unwrap_or(0.0);
        item.set(Channel::Rotate, ChannelValue::Deg(rotate + e.before_delta));
        true
    }

    pub fn on_drag(&mut self, e: &DragEvent) -> bool {
        let Some(item) = self.selected_item_mut() else {
            return false;
        };
        let tx = item.number(Channel::Tx).unwrap_or(0.0);
        let ty = item.number(Channel::Ty).unwrap_or(0.0);
        item.set(Channel::Tx, ChannelValue::Px(tx + e.before_delta.x));
        item.set(Channel::Ty, ChannelValue::Px(ty + e.before_delta.y));
        true
    }

    pub fn on_scale(&mut self, e: &ScaleEvent) -> bool {
        let Some(item) = self.selected_item_mut() else {
            return false;
        };
        let sx = item.number(Channel::Sx).unwrap_or(1.0);
        let sy = item.number(Channel::Sy).unwrap_or(1.0);
        item.set(Channel::Sx, ChannelValue::Number(sx * e.delta.x));
        item.set(Channel::Sy, ChannelValue::Number(sy * e.delta.y));
        true
    }

    /// Sets the inline size only on axes that changed; the transform map is left alone
    /// apart from the drag keeping the opposite edge in place.
    pub fn on_resize(&mut self, e: &ResizeEvent) -> bool {
        let Some(id) = self.target.clone() else {
            return false;
        };
        let size = self.sizes.entry(id).or_default();
        if e.delta.x != 0.0 {
            size.width = Some(e.width);
        }
        if e.delta.y != 0.0 {
            size.height = Some(e.height);
        }
        if e.drag.before_delta != DVec2::ZERO {
            self.on_drag(&e.drag);
        }
        if let Some(warp) = &e.warp {
            self.on_warp(warp);
        }
        true
    }

    pub fn on_warp(&mut self, e: &WarpEvent) -> bool {
        let Some(item) = self.selected_item_mut() else {
            return false;
        };
        let matrix = match item.warp() {
            Some(stored) => stored * e.delta,
            None => e.delta,
        };
        item.set(Channel::Matrix3d, ChannelValue::Matrix(matrix));
        true
    }

    /// Inline style for an element: transform origin, serialized channels and any resized size.
    pub fn element_style(&self, id: &str) -> String {
        let mut style = String::from("transform-box: fill-box; transform-origin: center;");
        if let Some(frame) = self.items.get(id) {
            let css = frame.to_css();
            if !css.is_empty() {
                style.push(' ');
                style.push_str(&css);
            }
        }
        let size = self.style_size(id);
        if let Some(width) = size.width {
            let _ = write!(style, " width: {}px;", width);
        }
        if let Some(height) = size.height {
            let _ = write!(style, " height: {}px;", height);
        }
        style
    }

    /// Where the browser draws the selection, for placing the handles.
    pub fn control_geometry(&self) -> Option<ControlGeometry> {
        let id = self.target.as_deref()?;
        let frame = self.items.get(id)?;
        let geometry = self.geometry(id);
        let size = geometry.size.as_vec();
        let origin = geometry.origin();

        let matrix = DMat4::from_translation(geometry.offset.extend(0.0)) * frame.matrix(origin);
        let corners = [
            project_point(&matrix, DVec2::ZERO)?,
            project_point(&matrix, DVec2::new(size.x, 0.0))?,
            project_point(&matrix, size)?,
            project_point(&matrix, DVec2::new(0.0, size.y))?,
        ];
        let center = project_point(&matrix, origin)?;

        let top = (corners[0] + corners[1]) / 2.0;
        let outward = (top - center).try_normalize().unwrap_or(DVec2::NEG_Y);
        Some(ControlGeometry {
            corners,
            center,
            rotation_handle: top + outward * ROTATION_HANDLE_DISTANCE,
        })
    }
}
