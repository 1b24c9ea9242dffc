//! Turns pointer movement on the canvas into incremental gesture events.
//!
//! A [`GestureTracker`] lives from pointer-down to pointer-up. It snapshots the target's
//! geometry when the gesture starts and reports, per pointer sample, only the change since
//! the last event it emitted, which is what the transform store accumulates.

use glam::{DMat2, DMat3, DMat4, DVec2, DVec3, DVec4};

use crate::config::MoverOptions;
use crate::frame::{project_point, Frame};
use crate::types::{Dimensions, HandleName};

/// Smallest size a resize may shrink an element to.
pub const MIN_SIZE: f64 = 10.0;
/// Scale factors never get closer to zero than this.
pub const MIN_SCALE: f64 = 0.01;
const EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragEvent {
    /// Translation since the previous drag event.
    pub before_delta: DVec2,
    /// Translation since the gesture started.
    pub dist: DVec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotateEvent {
    /// Degrees since the previous rotate event.
    pub before_delta: f64,
    /// Degrees since the gesture started.
    pub dist: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleEvent {
    /// Factors relative to the previous scale event.
    pub delta: DVec2,
    /// Factors relative to the start of the gesture.
    pub dist: DVec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeEvent {
    pub width: f64,
    pub height: f64,
    /// Size change since the previous resize event.
    pub delta: DVec2,
    /// Translation keeping the edge opposite the handle in place.
    pub drag: DragEvent,
    /// Re-centering of a stored `matrix3d`, so a warped element keeps its opposite edge too.
    pub warp: Option<WarpEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WarpEvent {
    /// Matrix to right-multiply into the stored `matrix3d`.
    pub delta: DMat4,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Drag(DragEvent),
    Rotate(RotateEvent),
    Scale(ScaleEvent),
    Resize(ResizeEvent),
    Warp(WarpEvent),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Drag,
    Rotate,
    Scale(HandleName),
    Resize(HandleName),
    /// Only corner handles warp.
    Warp(HandleName),
}

/// Where an element sits on the canvas before its own transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementGeometry {
    pub offset: DVec2,
    pub size: Dimensions,
}

impl ElementGeometry {
    /// Transform origin in the element's local space.
    pub fn origin(&self) -> DVec2 {
        self.size.as_vec() / 2.0
    }
}

/// Rounds `value` to the nearest multiple of `step`; a non-positive step disables rounding.
pub fn throttle(value: f64, step: f64) -> f64 {
    if step <= 0.0 {
        value
    } else {
        (value / step).round() * step
    }
}

fn clamp_scale(factor: f64) -> f64 {
    if factor.abs() < MIN_SCALE {
        MIN_SCALE.copysign(factor)
    } else {
        factor
    }
}

/// Wraps an angle difference into `[-180, 180)` degrees.
fn wrap_degrees(delta: f64) -> f64 {
    (delta + 180.0).rem_euclid(360.0) - 180.0
}

fn angle_of(v: DVec2) -> f64 {
    v.y.atan2(v.x).to_degrees()
}

/// Projective map taking the unit square onto `quad` (corners in [`HandleName::CORNERS`] order).
fn square_to_quad(quad: &[DVec2; 4]) -> Option<DMat3> {
    let [p0, p1, p2, p3] = *quad;
    let sx = p0.x - p1.x + p2.x - p3.x;
    let sy = p0.y - p1.y + p2.y - p3.y;

    let (g, h) = if sx.abs() < EPSILON && sy.abs() < EPSILON {
        (0.0, 0.0)
    } else {
        let dx1 = p1.x - p2.x;
        let dx2 = p3.x - p2.x;
        let dy1 = p1.y - p2.y;
        let dy2 = p3.y - p2.y;
        let den = dx1 * dy2 - dx2 * dy1;
        if den.abs() < EPSILON {
            return None;
        }
        ((sx * dy2 - dx2 * sy) / den, (dx1 * sy - sx * dy1) / den)
    };

    Some(DMat3::from_cols(
        DVec3::new(p1.x - p0.x + g * p1.x, p1.y - p0.y + g * p1.y, g),
        DVec3::new(p3.x - p0.x + h * p3.x, p3.y - p0.y + h * p3.y, h),
        DVec3::new(p0.x, p0.y, 1.0),
    ))
}

/// `matrix3d` mapping the corners of `src` onto the corners of `dst`.
pub fn quad_to_matrix3d(src: &[DVec2; 4], dst: &[DVec2; 4]) -> Option<DMat4> {
    let from = square_to_quad(src)?;
    let to = square_to_quad(dst)?;
    if from.determinant().abs() < EPSILON || to.determinant().abs() < EPSILON {
        return None;
    }
    let mut h = to * from.inverse();
    if h.z_axis.z.abs() > EPSILON {
        h = h * (1.0 / h.z_axis.z);
    }

    Some(DMat4::from_cols(
        DVec4::new(h.x_axis.x, h.x_axis.y, 0.0, h.x_axis.z),
        DVec4::new(h.y_axis.x, h.y_axis.y, 0.0, h.y_axis.z),
        DVec4::new(0.0, 0.0, 1.0, 0.0),
        DVec4::new(h.z_axis.x, h.z_axis.y, 0.0, h.z_axis.z),
    ))
}

fn invert(m: &DMat2) -> Option<DMat2> {
    (m.determinant().abs() > EPSILON).then(|| m.inverse())
}

#[derive(Debug, Clone)]
pub struct GestureTracker {
    kind: GestureKind,
    start_pointer: DVec2,
    last_pointer: DVec2,
    center: DVec2,
    start_size: Dimensions,
    start_linear: DMat2,
    start_rotation: f64,
    start_corners: [DVec2; 4],
    keep_ratio: bool,
    step: f64,

    drag_total: DVec2,
    angle_raw: f64,
    angle_total: f64,
    scale_total: DVec2,
    size: Dimensions,
    resize_drag_total: DVec2,
    warp: DMat4,
}

impl GestureTracker {
    pub fn new(
        kind: GestureKind,
        pointer: DVec2,
        frame: &Frame,
        geometry: ElementGeometry,
        options: &MoverOptions,
    ) -> Self {
        let origin = geometry.origin();
        let center = geometry.offset
            + project_point(&frame.matrix(origin), origin).unwrap_or(origin + frame.translation());
        let warp = frame.warp().unwrap_or(DMat4::IDENTITY);
        let start_corners = local_corners(geometry.size).map(|corner| project_point(&warp, corner).unwrap_or(corner));
        let step = match kind {
            GestureKind::Drag => options.throttle_drag,
            GestureKind::Rotate => options.throttle_rotate,
            GestureKind::Scale(_) => options.throttle_scale,
            GestureKind::Resize(_) => options.throttle_resize,
            GestureKind::Warp(_) => 0.0,
        };

        Self {
            kind,
            start_pointer: pointer,
            last_pointer: pointer,
            center,
            start_size: geometry.size,
            start_linear: frame.linear(),
            start_rotation: frame.rotation_degrees(),
            start_corners,
            keep_ratio: options.keep_ratio,
            step,
            drag_total: DVec2::ZERO,
            angle_raw: 0.0,
            angle_total: 0.0,
            scale_total: DVec2::ONE,
            size: geometry.size,
            resize_drag_total: DVec2::ZERO,
            warp,
        }
    }

    pub fn kind(&self) -> GestureKind {
        self.kind
    }

    /// Feeds one pointer sample (canvas coordinates) and returns the resulting event, if any.
    pub fn update(&mut self, pointer: DVec2) -> Option<Gesture> {
        if pointer == self.last_pointer {
            return None;
        }
        let previous = self.last_pointer;
        self.last_pointer = pointer;

        match self.kind {
            GestureKind::Drag => self.drag(pointer),
            GestureKind::Rotate => self.rotate(previous, pointer),
            GestureKind::Scale(handle) => self.scale(handle, pointer),
            GestureKind::Resize(handle) => self.resize(handle, pointer),
            GestureKind::Warp(handle) => self.warp(handle, pointer),
        }
    }

    fn drag(&mut self, pointer: DVec2) -> Option<Gesture> {
        let raw = pointer - self.start_pointer;
        let total = DVec2::new(throttle(raw.x, self.step), throttle(raw.y, self.step));
        let before_delta = total - self.drag_total;
        if before_delta == DVec2::ZERO {
            return None;
        }
        self.drag_total = total;
        Some(Gesture::Drag(DragEvent {
            before_delta,
            dist: total,
        }))
    }

    fn rotate(&mut self, previous: DVec2, pointer: DVec2) -> Option<Gesture> {
        let from = previous - self.center;
        let to = pointer - self.center;
        if from.length() < EPSILON || to.length() < EPSILON {
            return None;
        }
        self.angle_raw += wrap_degrees(angle_of(to) - angle_of(from));

        let total = throttle(self.angle_raw, self.step);
        let before_delta = total - self.angle_total;
        if before_delta == 0.0 {
            return None;
        }
        self.angle_total = total;
        Some(Gesture::Rotate(RotateEvent {
            before_delta,
            dist: total,
        }))
    }

    fn scale(&mut self, handle: HandleName, pointer: DVec2) -> Option<Gesture> {
        let unrotate = DMat2::from_angle(-self.start_rotation.to_radians());
        let start_local = unrotate * (self.start_pointer - self.center);
        let local = unrotate * (pointer - self.center);
        let dir = handle.direction();

        let axis_factor = |d: f64, start: f64, now: f64| {
            if d != 0.0 && start.abs() > EPSILON {
                now / start
            } else {
                1.0
            }
        };
        let mut factors = DVec2::new(
            axis_factor(dir.x, start_local.x, local.x),
            axis_factor(dir.y, start_local.y, local.y),
        );

        if self.keep_ratio {
            let uniform = if handle.is_corner() {
                if start_local.length() < EPSILON {
                    return None;
                }
                local.length() / start_local.length()
            } else if dir.x != 0.0 {
                factors.x
            } else {
                factors.y
            };
            factors = DVec2::splat(uniform);
        }

        let total = DVec2::new(
            clamp_scale(throttle(clamp_scale(factors.x), self.step)),
            clamp_scale(throttle(clamp_scale(factors.y), self.step)),
        );
        let delta = total / self.scale_total;
        if delta == DVec2::ONE {
            return None;
        }
        self.scale_total = total;
        Some(Gesture::Scale(ScaleEvent { delta, dist: total }))
    }

    fn resize(&mut self, handle: HandleName, pointer: DVec2) -> Option<Gesture> {
        let inverse = invert(&self.start_linear)?;
        let local = inverse * (pointer - self.start_pointer);
        let dir = handle.direction();

        let mut width = self.start_size.width + dir.x * local.x;
        let mut height = self.start_size.height + dir.y * local.y;
        if self.keep_ratio {
            let start = self.start_size;
            if dir.x != 0.0 && start.width > EPSILON {
                height = width * start.height / start.width;
            } else if dir.y != 0.0 && start.height > EPSILON {
                width = height * start.width / start.height;
            }
        }
        width = throttle(width.max(MIN_SIZE), self.step).max(MIN_SIZE);
        height = throttle(height.max(MIN_SIZE), self.step).max(MIN_SIZE);

        let next = Dimensions::new(width, height);
        let delta = next.as_vec() - self.size.as_vec();
        if delta == DVec2::ZERO {
            return None;
        }

        // The edge opposite the handle stays put; a zero direction keeps the middle.
        let anchor = (DVec2::ONE - dir) / 2.0;
        let anchor_at = |size: Dimensions| {
            let s = size.as_vec();
            self.start_linear * (anchor * s - s / 2.0) + s / 2.0
        };
        let before_delta = anchor_at(self.size) - anchor_at(next);
        self.resize_drag_total += before_delta;
        self.size = next;

        // The warp acts about the center; conjugate it by how far the center moved from the anchor.
        let warp = if self.warp == DMat4::IDENTITY || self.warp.determinant().abs() < EPSILON {
            None
        } else {
            let shift = DMat4::from_translation(((anchor - 0.5) * delta).extend(0.0));
            let next_warp = shift * self.warp * shift.inverse();
            let warp_delta = self.warp.inverse() * next_warp;
            self.warp = next_warp;
            Some(WarpEvent { delta: warp_delta })
        };

        Some(Gesture::Resize(ResizeEvent {
            width,
            height,
            delta,
            drag: DragEvent {
                before_delta,
                dist: self.resize_drag_total,
            },
            warp,
        }))
    }

    fn warp(&mut self, handle: HandleName, pointer: DVec2) -> Option<Gesture> {
        let index = handle.corner_index()?;
        let inverse = invert(&self.start_linear)?;

        let mut moved = self.start_corners;
        moved[index] += inverse * (pointer - self.start_pointer);

        let next = quad_to_matrix3d(&local_corners(self.start_size), &moved)?;
        if self.warp.determinant().abs() < EPSILON {
            return None;
        }
        let delta = self.warp.inverse() * next;
        self.warp = next;
        Some(Gesture::Warp(WarpEvent { delta }))
    }
}

/// Element corners relative to its center, in [`HandleName::CORNERS`] order.
fn local_corners(size: Dimensions) -> [DVec2; 4] {
    let half = size.as_vec() / 2.0;
    [
        DVec2::new(-half.x, -half.y),
        DVec2::new(half.x, -half.y),
        DVec2::new(half.x, half.y),
        DVec2::new(-half.x, half.y),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{Channel, ChannelValue};

    fn geometry() -> ElementGeometry {
        ElementGeometry {
            offset: DVec2::ZERO,
            size: Dimensions::new(50.0, 50.0),
        }
    }

    fn tracker(kind: GestureKind, pointer: DVec2) -> GestureTracker {
        GestureTracker::new(kind, pointer, &Frame::room_default(), geometry(), &MoverOptions::default())
    }

    fn close(a: DVec2, b: DVec2) -> bool {
        (a - b).length() < 1e-6
    }

    #[test]
    fn test_throttle() {
        assert_eq!(throttle(7.3, 0.0), 7.3);
        assert_eq!(throttle(7.3, 5.0), 5.0);
        assert_eq!(throttle(8.0, 5.0), 10.0);
        assert_eq!(throttle(-44.0, 15.0), -45.0);
    }

    #[test]
    fn test_drag_reports_incremental_deltas() {
        let mut t = tracker(GestureKind::Drag, DVec2::new(10.0, 10.0));
        let Some(Gesture::Drag(first)) = t.update(DVec2::new(15.0, 12.0)) else {
            panic!("expected drag");
        };
        assert_eq!(first.before_delta, DVec2::new(5.0, 2.0));

        let Some(Gesture::Drag(second)) = t.update(DVec2::new(16.0, 20.0)) else {
            panic!("expected drag");
        };
        assert_eq!(second.before_delta, DVec2::new(1.0, 8.0));
        assert_eq!(second.dist, DVec2::new(6.0, 10.0));

        assert_eq!(t.update(DVec2::new(16.0, 20.0)), None);
    }

    #[test]
    fn test_throttled_drag_waits_for_a_full_step() {
        let options = MoverOptions {
            throttle_drag: 10.0,
            ..MoverOptions::default()
        };
        let mut t = GestureTracker::new(GestureKind::Drag, DVec2::ZERO, &Frame::room_default(), geometry(), &options);
        assert_eq!(t.update(DVec2::new(3.0, 0.0)), None);
        let Some(Gesture::Drag(event)) = t.update(DVec2::new(6.0, 0.0)) else {
            panic!("expected drag");
        };
        assert_eq!(event.before_delta, DVec2::new(10.0, 0.0));
    }

    #[test]
    fn test_rotate_unwraps_past_half_turn() {
        // Center of the element is (25, 25); sweep a full circle in quarter steps.
        let center = DVec2::new(25.0, 25.0);
        let mut t = tracker(GestureKind::Rotate, center + DVec2::new(10.0, 0.0));
        let path = [
            DVec2::new(0.0, 10.0),
            DVec2::new(-10.0, 0.0),
            DVec2::new(0.0, -10.0),
            DVec2::new(10.0, 0.0),
            DVec2::new(0.0, 10.0),
        ];
        let mut total = 0.0;
        for offset in path {
            if let Some(Gesture::Rotate(event)) = t.update(center + offset) {
                assert!((event.before_delta - 90.0).abs() < 1e-9);
                total = event.dist;
            }
        }
        assert!((total - 450.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotate_ignores_pointer_on_center() {
        let mut t = tracker(GestureKind::Rotate, DVec2::new(35.0, 25.0));
        assert_eq!(t.update(DVec2::new(25.0, 25.0)), None);
    }

    #[test]
    fn test_scale_from_right_edge() {
        let mut t = tracker(GestureKind::Scale(HandleName::Right), DVec2::new(50.0, 25.0));
        let Some(Gesture::Scale(first)) = t.update(DVec2::new(75.0, 40.0)) else {
            panic!("expected scale");
        };
        assert!(close(first.delta, DVec2::new(2.0, 1.0)));

        let Some(Gesture::Scale(second)) = t.update(DVec2::new(62.5, 25.0)) else {
            panic!("expected scale");
        };
        assert!(close(second.delta, DVec2::new(0.75, 1.0)));
        assert!(close(second.dist, DVec2::new(1.5, 1.0)));
    }

    #[test]
    fn test_scale_clamps_away_from_zero() {
        let mut t = tracker(GestureKind::Scale(HandleName::Bottom), DVec2::new(25.0, 50.0));
        let Some(Gesture::Scale(event)) = t.update(DVec2::new(25.0, 25.0)) else {
            panic!("expected scale");
        };
        assert_eq!(event.dist.y, MIN_SCALE);
    }

    #[test]
    fn test_scale_keep_ratio_corner_is_uniform() {
        let options = MoverOptions {
            keep_ratio: true,
            ..MoverOptions::default()
        };
        let mut t = GestureTracker::new(
            GestureKind::Scale(HandleName::BottomRight),
            DVec2::new(50.0, 50.0),
            &Frame::room_default(),
            geometry(),
            &options,
        );
        let Some(Gesture::Scale(event)) = t.update(DVec2::new(75.0, 75.0)) else {
            panic!("expected scale");
        };
        assert!(close(event.delta, DVec2::splat(2.0)));
    }

    #[test]
    fn test_resize_right_keeps_left_edge() {
        let mut t = tracker(GestureKind::Resize(HandleName::Right), DVec2::new(50.0, 25.0));
        let Some(Gesture::Resize(event)) = t.update(DVec2::new(70.0, 30.0)) else {
            panic!("expected resize");
        };
        assert_eq!((event.width, event.height), (70.0, 50.0));
        assert_eq!(event.delta, DVec2::new(20.0, 0.0));
        // Unrotated and unscaled: growing from the origin needs no compensation.
        assert!(close(event.drag.before_delta, DVec2::ZERO));
    }

    #[test]
    fn test_resize_left_shifts_to_keep_right_edge() {
        let mut t = tracker(GestureKind::Resize(HandleName::Left), DVec2::new(0.0, 25.0));
        let Some(Gesture::Resize(event)) = t.update(DVec2::new(-10.0, 25.0)) else {
            panic!("expected resize");
        };
        assert_eq!(event.width, 60.0);
        assert!(close(event.drag.before_delta, DVec2::new(-10.0, 0.0)));
    }

    #[test]
    fn test_resize_keep_ratio_on_edge_derives_other_axis() {
        let options = MoverOptions {
            keep_ratio: true,
            ..MoverOptions::default()
        };
        let mut t = GestureTracker::new(
            GestureKind::Resize(HandleName::Bottom),
            DVec2::new(25.0, 50.0),
            &Frame::room_default(),
            ElementGeometry {
                offset: DVec2::ZERO,
                size: Dimensions::new(100.0, 50.0),
            },
            &options,
        );
        let Some(Gesture::Resize(event)) = t.update(DVec2::new(25.0, 75.0)) else {
            panic!("expected resize");
        };
        assert_eq!((event.width, event.height), (150.0, 75.0));
        assert_eq!(event.delta, DVec2::new(50.0, 25.0));
        // The top edge stays, the free axis grows about the middle.
        assert!(close(event.drag.before_delta, DVec2::new(-25.0, 0.0)));
    }

    #[test]
    fn test_resize_without_warp_emits_no_matrix() {
        let mut t = tracker(GestureKind::Resize(HandleName::Left), DVec2::new(0.0, 25.0));
        let Some(Gesture::Resize(event)) = t.update(DVec2::new(-10.0, 25.0)) else {
            panic!("expected resize");
        };
        assert_eq!(event.warp, None);
    }

    #[test]
    fn test_resize_recenters_stored_warp() {
        let mut frame = Frame::room_default();
        let warp = quad_to_matrix3d(
            &local_corners(Dimensions::new(50.0, 50.0)),
            &[
                DVec2::new(-25.0, -25.0),
                DVec2::new(25.0, -25.0),
                DVec2::new(25.0, 25.0),
                DVec2::new(-35.0, 35.0),
            ],
        )
        .unwrap();
        frame.set(Channel::Matrix3d, ChannelValue::Matrix(warp));
        let mut t = GestureTracker::new(
            GestureKind::Resize(HandleName::Right),
            DVec2::new(50.0, 25.0),
            &frame,
            geometry(),
            &MoverOptions::default(),
        );
        let Some(Gesture::Resize(event)) = t.update(DVec2::new(70.0, 25.0)) else {
            panic!("expected resize");
        };
        let next = warp * event.warp.unwrap().delta;
        // Relative to the new center the left edge sits 10 further left; it must land where it was.
        let shift = DVec2::new(-10.0, 0.0);
        for corner in [DVec2::new(-25.0, -25.0), DVec2::new(-25.0, 25.0)] {
            let before = project_point(&warp, corner).unwrap();
            let after = project_point(&next, corner + shift).unwrap() - shift;
            assert!(close(after, before));
        }
    }

    #[test]
    fn test_resize_respects_minimum() {
        let mut t = tracker(GestureKind::Resize(HandleName::Bottom), DVec2::new(25.0, 50.0));
        let Some(Gesture::Resize(event)) = t.update(DVec2::new(25.0, -100.0)) else {
            panic!("expected resize");
        };
        assert_eq!(event.height, MIN_SIZE);
    }

    #[test]
    fn test_resize_follows_rotation() {
        let mut frame = Frame::room_default();
        frame.set(Channel::Rotate, ChannelValue::Deg(90.0));
        let mut t = GestureTracker::new(
            GestureKind::Resize(HandleName::Right),
            DVec2::new(25.0, 50.0),
            &frame,
            geometry(),
            &MoverOptions::default(),
        );
        // Local +x points down the screen after a quarter turn.
        let Some(Gesture::Resize(event)) = t.update(DVec2::new(25.0, 60.0)) else {
            panic!("expected resize");
        };
        assert!((event.width - 60.0).abs() < 1e-9);
        assert!((event.height - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_quad_to_matrix3d_identity_and_translation() {
        let quad = local_corners(Dimensions::new(50.0, 30.0));
        let identity = quad_to_matrix3d(&quad, &quad).unwrap();
        assert!(identity.abs_diff_eq(DMat4::IDENTITY, 1e-9));

        let shifted = quad.map(|p| p + DVec2::new(5.0, -3.0));
        let m = quad_to_matrix3d(&quad, &shifted).unwrap();
        for (src, dst) in quad.iter().zip(shifted.iter()) {
            assert!(close(project_point(&m, *src).unwrap(), *dst));
        }
    }

    #[test]
    fn test_quad_to_matrix3d_perspective() {
        let quad = local_corners(Dimensions::new(50.0, 50.0));
        let mut target = quad;
        target[1] += DVec2::new(12.0, -8.0);
        let m = quad_to_matrix3d(&quad, &target).unwrap();
        for (src, dst) in quad.iter().zip(target.iter()) {
            assert!(close(project_point(&m, *src).unwrap(), *dst));
        }
    }

    #[test]
    fn test_quad_to_matrix3d_rejects_degenerate() {
        let quad = local_corners(Dimensions::new(50.0, 50.0));
        let collapsed = [DVec2::ZERO; 4];
        assert_eq!(quad_to_matrix3d(&quad, &collapsed), None);
    }

    #[test]
    fn test_warp_deltas_compose_to_final_matrix() {
        let mut t = tracker(GestureKind::Warp(HandleName::TopRight), DVec2::new(50.0, 0.0));
        let mut stored: Option<DMat4> = None;
        for pointer in [DVec2::new(55.0, -2.0), DVec2::new(62.0, -6.0)] {
            if let Some(Gesture::Warp(event)) = t.update(pointer) {
                stored = Some(match stored {
                    Some(m) => m * event.delta,
                    None => event.delta,
                });
            }
        }
        let stored = stored.unwrap();
        let moved = project_point(&stored, DVec2::new(25.0, -25.0)).unwrap();
        assert!(close(moved, DVec2::new(37.0, -31.0)));
        let fixed = project_point(&stored, DVec2::new(-25.0, 25.0)).unwrap();
        assert!(close(fixed, DVec2::new(-25.0, 25.0)));
    }

    #[test]
    fn test_warp_ignores_edge_handles() {
        let mut t = tracker(GestureKind::Warp(HandleName::Top), DVec2::new(25.0, 0.0));
        assert_eq!(t.update(DVec2::new(30.0, 0.0)), None);
    }
}
