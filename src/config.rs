use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::ControlMode;

/// Id of the optional `<script type="application/json">` element holding an [`AppConfig`].
pub const CONFIG_ELEMENT_ID: &str = "room-mover-config";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("view box `{0}` must be four numbers")]
    InvalidViewBox(String),
    #[error("view box size must be positive, got {width}x{height}")]
    NonPositiveViewBox { width: f64, height: f64 },
    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// The `viewBox` of the canvas SVG.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ViewBoxSpecs {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBoxSpecs {
    pub fn new(min_x: f64, min_y: f64, width: f64, height: f64) -> Result<Self, ConfigError> {
        if width <= 0.0 || height <= 0.0 || width.is_nan() || height.is_nan() {
            return Err(ConfigError::NonPositiveViewBox { width, height });
        }
        Ok(Self {
            min_x,
            min_y,
            width,
            height,
        })
    }

    /// Value for the SVG `viewBox` attribute.
    pub fn description(&self) -> String {
        self.to_string()
    }
}

impl Default for ViewBoxSpecs {
    fn default() -> Self {
        Self {
            min_x: 0.0,
            min_y: 0.0,
            width: 800.0,
            height: 600.0,
        }
    }
}

impl fmt::Display for ViewBoxSpecs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.min_x, self.min_y, self.width, self.height)
    }
}

impl FromStr for ViewBoxSpecs {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values: Vec<f64> = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|part| !part.is_empty())
            .map(|part| part.parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|_| ConfigError::InvalidViewBox(s.to_string()))?;

        match values.as_slice() {
            [min_x, min_y, width, height] => Self::new(*min_x, *min_y, *width, *height),
            _ => Err(ConfigError::InvalidViewBox(s.to_string())),
        }
    }
}

impl TryFrom<String> for ViewBoxSpecs {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ViewBoxSpecs> for String {
    fn from(value: ViewBoxSpecs) -> Self {
        value.description()
    }
}

/// Behaviour switches for the control box. Throttle steps of 0 disable throttling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MoverOptions {
    pub keep_ratio: bool,
    pub draggable: bool,
    pub rotatable: bool,
    pub mode: ControlMode,
    pub show_origin: bool,
    pub throttle_drag: f64,
    pub throttle_rotate: f64,
    pub throttle_scale: f64,
    pub throttle_resize: f64,
}

impl Default for MoverOptions {
    fn default() -> Self {
        Self {
            keep_ratio: false,
            draggable: true,
            rotatable: true,
            mode: ControlMode::Scale,
            show_origin: true,
            throttle_drag: 0.0,
            throttle_rotate: 0.0,
            throttle_scale: 0.0,
            throttle_resize: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub view_box: ViewBoxSpecs,
    pub options: MoverOptions,
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads the config element from the page, falling back to defaults.
    pub fn from_document() -> Self {
        let Some(element) = gloo_utils::document().get_element_by_id(CONFIG_ELEMENT_ID) else {
            return Self::default();
        };
        let text = element.text_content().unwrap_or_default();
        match Self::from_json(&text) {
            Ok(config) => {
                log::debug!("loaded configuration from #{}", CONFIG_ELEMENT_ID);
                config
            }
            Err(err) => {
                log::warn!("ignoring #{}: {}", CONFIG_ELEMENT_ID, err);
                Self::default()
            }
        }
    }
}
