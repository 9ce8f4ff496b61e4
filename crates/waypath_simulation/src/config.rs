//! Indicator tuning (RON)
//!
//! ```ron
//! (
//!     screen_edges_margin: 50.0,
//!     smooth_strength: 10.0,
//!     rotation_offset: 90.0,
//! )
//! ```
//! Отсутствующие поля берутся из `Default`.

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::WaypathResult;
use crate::logger;

/// Параметры indicator'а (размещение, сглаживание, пульсация)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct IndicatorConfig {
    /// Отступ arrow от краёв canvas (reference units)
    pub screen_edges_margin: f32,
    /// Сила lerp'а в секунду (умножается на delta time)
    pub smooth_strength: f32,
    /// Доп. поворот arrow sprite (градусы)
    pub rotation_offset: f32,
    pub pulsing_speed: f32,
    /// Амплитуда пульсации по Y (reference units)
    pub pulsing_distance: f32,
    pub rotate_arrow: bool,
    pub clamp_position: bool,
    pub smooth: bool,
    pub pulsing_enabled: bool,
    /// Reference resolution canvas scaler'а
    pub canvas_width: f32,
    pub canvas_height: f32,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            screen_edges_margin: 50.0,
            smooth_strength: 10.0,
            rotation_offset: 90.0,
            pulsing_speed: 1.0,
            pulsing_distance: 20.0,
            rotate_arrow: true,
            clamp_position: true,
            smooth: true,
            pulsing_enabled: true,
            canvas_width: 1920.0,
            canvas_height: 1080.0,
        }
    }
}

impl IndicatorConfig {
    pub fn resolution(&self) -> Vec2 {
        Vec2::new(self.canvas_width, self.canvas_height)
    }

    pub fn from_ron_str(text: &str) -> WaypathResult<Self> {
        Ok(ron::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> WaypathResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }

    /// Как `load`, но при ошибке — warning и defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                logger::log_warning(&format!(
                    "Indicator config {} not loaded ({}), using defaults",
                    path.display(),
                    err
                ));
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WaypathError;

    #[test]
    fn test_partial_ron_keeps_defaults() {
        let config = IndicatorConfig::from_ron_str("(screen_edges_margin: 80.0, smooth: false)").unwrap();
        assert_eq!(config.screen_edges_margin, 80.0);
        assert!(!config.smooth);
        assert_eq!(config.smooth_strength, 10.0);
        assert_eq!(config.resolution(), Vec2::new(1920.0, 1080.0));
    }

    #[test]
    fn test_invalid_ron_is_config_error() {
        let err = IndicatorConfig::from_ron_str("(screen_edges_margin: \"wide\")").unwrap_err();
        assert!(matches!(err, WaypathError::Config(_)));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = IndicatorConfig::load_or_default("definitely/not/here.ron");
        assert_eq!(config, IndicatorConfig::default());
    }
}
