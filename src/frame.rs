//! Per-shape transform state.
//!
//! A [`Frame`] is an insertion-ordered set of named transform channels. It renders to an
//! inline CSS `transform` declaration and to the equivalent 4x4 matrix, so the control box
//! can be drawn exactly where the browser puts the element.

use std::fmt;

use glam::{DMat2, DMat4, DVec2, DVec3, DVec4};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Tx,
    Ty,
    Tz,
    Rotate,
    Sx,
    Sy,
    Matrix3d,
}

impl Channel {
    pub const ALL: [Channel; 7] = [
        Channel::Tx,
        Channel::Ty,
        Channel::Tz,
        Channel::Rotate,
        Channel::Sx,
        Channel::Sy,
        Channel::Matrix3d,
    ];

    /// Short name used when reading and writing the channel.
    pub fn alias(&self) -> &'static str {
        match self {
            Channel::Tx => "tx",
            Channel::Ty => "ty",
            Channel::Tz => "tz",
            Channel::Rotate => "rotate",
            Channel::Sx => "sx",
            Channel::Sy => "sy",
            Channel::Matrix3d => "matrix3d",
        }
    }

    /// CSS transform function the channel serializes to.
    pub fn css_function(&self) -> &'static str {
        match self {
            Channel::Tx => "translateX",
            Channel::Ty => "translateY",
            Channel::Tz => "translateZ",
            Channel::Rotate => "rotate",
            Channel::Sx => "scaleX",
            Channel::Sy => "scaleY",
            Channel::Matrix3d => "matrix3d",
        }
    }

    pub fn from_alias(alias: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|channel| channel.alias() == alias)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChannelValue {
    Px(f64),
    Deg(f64),
    Number(f64),
    /// Column-major 4x4 matrix, the layout CSS `matrix3d()` expects.
    Matrix(DMat4),
}

impl ChannelValue {
    /// Leading number of the rendered value; matrices have none.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ChannelValue::Px(v) | ChannelValue::Deg(v) | ChannelValue::Number(v) => Some(*v),
            ChannelValue::Matrix(_) => None,
        }
    }

    pub fn as_matrix(&self) -> Option<DMat4> {
        match self {
            ChannelValue::Matrix(m) => Some(*m),
            _ => None,
        }
    }

    /// Matrix the value contributes for the given channel.
    fn to_matrix(self, channel: Channel) -> DMat4 {
        match (channel, self) {
            (Channel::Matrix3d, ChannelValue::Matrix(m)) => m,
            (_, ChannelValue::Matrix(_)) => DMat4::IDENTITY,
            (Channel::Tx, v) => DMat4::from_translation(DVec3::new(v.number_or(0.0), 0.0, 0.0)),
            (Channel::Ty, v) => DMat4::from_translation(DVec3::new(0.0, v.number_or(0.0), 0.0)),
            (Channel::Tz, v) => DMat4::from_translation(DVec3::new(0.0, 0.0, v.number_or(0.0))),
            (Channel::Rotate, v) => DMat4::from_rotation_z(v.number_or(0.0).to_radians()),
            (Channel::Sx, v) => DMat4::from_scale(DVec3::new(v.number_or(1.0), 1.0, 1.0)),
            (Channel::Sy, v) => DMat4::from_scale(DVec3::new(1.0, v.number_or(1.0), 1.0)),
            (Channel::Matrix3d, _) => DMat4::IDENTITY,
        }
    }

    fn number_or(&self, fallback: f64) -> f64 {
        self.as_number().unwrap_or(fallback)
    }
}

impl fmt::Display for ChannelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelValue::Px(v) => write!(f, "{}px", v),
            ChannelValue::Deg(v) => write!(f, "{}deg", v),
            ChannelValue::Number(v) => write!(f, "{}", v),
            ChannelValue::Matrix(m) => {
                let entries: Vec<String> = m.to_cols_array().iter().map(|v| v.to_string()).collect();
                write!(f, "{}", entries.join(","))
            }
        }
    }
}

/// Transform channels of one shape, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    channels: Vec<(Channel, ChannelValue)>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// State given to a room the first time it is selected.
    pub fn room_default() -> Self {
        let mut frame = Self::new();
        frame.set(Channel::Tz, ChannelValue::Px(5.0));
        frame.set(Channel::Tx, ChannelValue::Px(0.0));
        frame.set(Channel::Ty, ChannelValue::Px(0.0));
        frame.set(Channel::Rotate, ChannelValue::Deg(0.0));
        frame.set(Channel::Sx, ChannelValue::Number(1.0));
        frame.set(Channel::Sy, ChannelValue::Number(1.0));
        frame
    }

    pub fn get(&self, channel: Channel) -> Option<&ChannelValue> {
        self.channels
            .iter()
            .find(|(c, _)| *c == channel)
            .map(|(_, value)| value)
    }

    /// Replaces the channel in place, or appends it when it is not set yet.
    pub fn set(&mut self, channel: Channel, value: ChannelValue) {
        match self.channels.iter_mut().find(|(c, _)| *c == channel) {
            Some(slot) => slot.1 = value,
            None => self.channels.push((channel, value)),
        }
    }

    pub fn number(&self, channel: Channel) -> Option<f64> {
        self.get(channel).and_then(ChannelValue::as_number)
    }

    pub fn channels(&self) -> impl Iterator<Item = &(Channel, ChannelValue)> {
        self.channels.iter()
    }

    pub fn translation(&self) -> DVec2 {
        DVec2::new(
            self.number(Channel::Tx).unwrap_or(0.0),
            self.number(Channel::Ty).unwrap_or(0.0),
        )
    }

    pub fn rotation_degrees(&self) -> f64 {
        self.number(Channel::Rotate).unwrap_or(0.0)
    }

    pub fn scale(&self) -> DVec2 {
        DVec2::new(
            self.number(Channel::Sx).unwrap_or(1.0),
            self.number(Channel::Sy).unwrap_or(1.0),
        )
    }

    pub fn warp(&self) -> Option<DMat4> {
        self.get(Channel::Matrix3d).and_then(ChannelValue::as_matrix)
    }

    /// Rotation followed by scale, as it acts on local 2D offsets.
    pub fn linear(&self) -> DMat2 {
        DMat2::from_angle(self.rotation_degrees().to_radians()) * DMat2::from_diagonal(self.scale())
    }

    /// Full transform about `origin`, composed in channel order like the browser does.
    pub fn matrix(&self, origin: DVec2) -> DMat4 {
        let body = self
            .channels
            .iter()
            .fold(DMat4::IDENTITY, |acc, (channel, value)| acc * value.to_matrix(*channel));
        DMat4::from_translation(origin.extend(0.0)) * body * DMat4::from_translation(-origin.extend(0.0))
    }

    /// Space-separated CSS transform functions.
    pub fn to_transform(&self) -> String {
        self.channels
            .iter()
            .map(|(channel, value)| format!("{}({})", channel.css_function(), value))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Inline style declaration for the element.
    pub fn to_css(&self) -> String {
        if self.channels.is_empty() {
            return String::new();
        }
        format!("transform: {};", self.to_transform())
    }
}

/// Projects a 2D point through a 4x4 matrix, dividing by the homogeneous coordinate.
pub fn project_point(matrix: &DMat4, point: DVec2) -> Option<DVec2> {
    let v = *matrix * DVec4::new(point.x, point.y, 0.0, 1.0);
    if v.w.abs() < f64::EPSILON {
        return None;
    }
    Some(DVec2::new(v.x / v.w, v.y / v.w))
}
