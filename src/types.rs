use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Side length of a freshly added room, in canvas units.
pub const ROOM_SIZE: f64 = 50.0;

/// Offset of every room group inside the canvas.
pub const ROOM_OFFSET: DVec2 = DVec2::new(40.0, 10.0);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn as_vec(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }
}

/// A room placed on the canvas. Ids start at 1 and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: u32,
}

impl Room {
    pub fn new(id: u32) -> Self {
        Self { id }
    }

    /// Identifier carried by the room's rectangle in its `data-target` attribute.
    pub fn target_id(&self) -> String {
        format!("rect-{}", self.id)
    }

    /// Inverse of [`Room::target_id`].
    pub fn id_from_target(target: &str) -> Option<u32> {
        target.strip_prefix("rect-")?.parse().ok()
    }
}

/// Which set of handles the control box shows around the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlMode {
    #[default]
    Scale,
    Resize,
    Warp,
}

impl ControlMode {
    pub fn label(&self) -> &'static str {
        match self {
            ControlMode::Scale => "Scale",
            ControlMode::Resize => "Resize",
            ControlMode::Warp => "Warp",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleName {
    Right,
    Bottom,
    Left,
    Top,
    BottomRight,
    BottomLeft,
    TopRight,
    TopLeft,
}

impl HandleName {
    pub const ALL: [HandleName; 8] = [
        HandleName::TopLeft,
        HandleName::Top,
        HandleName::TopRight,
        HandleName::Right,
        HandleName::BottomRight,
        HandleName::Bottom,
        HandleName::BottomLeft,
        HandleName::Left,
    ];

    pub const CORNERS: [HandleName; 4] = [
        HandleName::TopLeft,
        HandleName::TopRight,
        HandleName::BottomRight,
        HandleName::BottomLeft,
    ];

    pub fn to_kebab_case(&self) -> &'static str {
        match self {
            HandleName::Right => "right",
            HandleName::Bottom => "bottom",
            HandleName::Left => "left",
            HandleName::Top => "top",
            HandleName::BottomRight => "bottom-right",
            HandleName::BottomLeft => "bottom-left",
            HandleName::TopRight => "top-right",
            HandleName::TopLeft => "top-left",
        }
    }

    pub fn cursor(&self) -> &'static str {
        match self {
            HandleName::Right => "ew-resize",
            HandleName::Left => "ew-resize",
            HandleName::Top => "ns-resize",
            HandleName::Bottom => "ns-resize",
            HandleName::TopLeft => "nwse-resize",
            HandleName::BottomRight => "nwse-resize",
            HandleName::TopRight => "nesw-resize",
            HandleName::BottomLeft => "nesw-resize",
        }
    }

    pub fn is_corner(&self) -> bool {
        matches!(
            self,
            HandleName::TopLeft
                | HandleName::TopRight
                | HandleName::BottomLeft
                | HandleName::BottomRight
        )
    }

    /// Outward direction of the handle in the element's local axes, each component -1, 0 or 1.
    pub fn direction(&self) -> DVec2 {
        match self {
            HandleName::Right => DVec2::new(1.0, 0.0),
            HandleName::Left => DVec2::new(-1.0, 0.0),
            HandleName::Top => DVec2::new(0.0, -1.0),
            HandleName::Bottom => DVec2::new(0.0, 1.0),
            HandleName::TopLeft => DVec2::new(-1.0, -1.0),
            HandleName::TopRight => DVec2::new(1.0, -1.0),
            HandleName::BottomLeft => DVec2::new(-1.0, 1.0),
            HandleName::BottomRight => DVec2::new(1.0, 1.0),
        }
    }

    /// Position of the corner in [`HandleName::CORNERS`] order.
    pub fn corner_index(&self) -> Option<usize> {
        match self {
            HandleName::TopLeft => Some(0),
            HandleName::TopRight => Some(1),
            HandleName::BottomRight => Some(2),
            HandleName::BottomLeft => Some(3),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_target_id_round_trip() {
        let room = Room::new(12);
        assert_eq!(room.target_id(), "rect-12");
        assert_eq!(Room::id_from_target("rect-12"), Some(12));
        assert_eq!(Room::id_from_target("app"), None);
        assert_eq!(Room::id_from_target("rect-x"), None);
    }

    #[test]
    fn test_corner_indices_follow_corner_order() {
        for (idx, corner) in HandleName::CORNERS.iter().enumerate() {
            assert_eq!(corner.corner_index(), Some(idx));
        }
        assert_eq!(HandleName::Top.corner_index(), None);
    }

    #[test]
    fn test_direction_matches_corner_flag() {
        for handle in HandleName::ALL {
            let dir = handle.direction();
            assert_eq!(handle.is_corner(), dir.x != 0.0 && dir.y != 0.0);
        }
    }
}
