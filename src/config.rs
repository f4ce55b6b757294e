//! Engine configuration.
//!
//! The engine never reads ambient state: every tunable lives in an
//! [`EngineConfig`] handed to [`crate::engine::EngineCore::with_config`].
//! [`EngineConfig::from_env`] layers `FLOWCANVAS_*` environment overrides on
//! top of the defaults for hosts (such as the CLI) that want them.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::consts;
use crate::viewport::ZoomBounds;

/// Errors produced while building an [`EngineConfig`].
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    /// An override was present but could not be parsed as a number.
    #[error("config parse failed: {key}={value}")]
    Parse { key: String, value: String },

    /// A value parsed but is outside its meaningful range.
    #[error("invalid config value for {key}: {reason}")]
    Invalid { key: &'static str, reason: &'static str },
}

/// Every tunable the engine consults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Zoom clamp shared by wheel, pinch, and snapshot load.
    pub zoom: ZoomBounds,
    /// Zoom change per unit of wheel `deltaY` with ctrl/cmd held.
    pub wheel_zoom_sensitivity: f64,
    /// Background click tolerance in screen pixels.
    pub click_epsilon_px: f64,
    /// Minimum `(width, height)` accepted by an explicit resize.
    pub min_node_size: (f64, f64),
    /// Auto-size reports closer than this to the stored size are ignored.
    pub auto_size_tolerance_px: f64,
    /// Size assumed for nodes that have not reported one.
    pub default_node_size: (f64, f64),
    /// Initial size of a newly added embed node.
    pub default_embed_size: (f64, f64),
    pub handle_diameter: f64,
    pub handle_gap: f64,
    /// Control-point distance for edge beziers.
    pub curvature: f64,
    /// Edge hit stroke width in screen pixels.
    pub edge_hit_width_px: f64,
    /// Seconds for one flow packet to traverse one edge.
    pub flow_cycle_secs: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            zoom: ZoomBounds::default(),
            wheel_zoom_sensitivity: consts::WHEEL_ZOOM_SENSITIVITY,
            click_epsilon_px: consts::CLICK_EPSILON_PX,
            min_node_size: (consts::MIN_RESIZE_WIDTH, consts::MIN_RESIZE_HEIGHT),
            auto_size_tolerance_px: consts::AUTO_SIZE_TOLERANCE_PX,
            default_node_size: (consts::DEFAULT_NODE_WIDTH, consts::DEFAULT_NODE_HEIGHT),
            default_embed_size: (consts::DEFAULT_EMBED_WIDTH, consts::DEFAULT_EMBED_HEIGHT),
            handle_diameter: consts::HANDLE_DIAMETER,
            handle_gap: consts::HANDLE_GAP,
            curvature: consts::BEZIER_CURVATURE,
            edge_hit_width_px: consts::EDGE_HIT_WIDTH_PX,
            flow_cycle_secs: consts::FLOW_CYCLE_SECS,
        }
    }
}

impl EngineConfig {
    /// Build a config from the defaults plus environment overrides.
    ///
    /// Optional:
    /// - `FLOWCANVAS_ZOOM_MIN`, `FLOWCANVAS_ZOOM_MAX`: zoom clamp (default 0.1 / 5)
    /// - `FLOWCANVAS_WHEEL_SENSITIVITY`: default 0.001
    /// - `FLOWCANVAS_CLICK_EPSILON_PX`: default 5
    /// - `FLOWCANVAS_CURVATURE`: default 50
    /// - `FLOWCANVAS_FLOW_CYCLE_SECS`: default 2
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an override does not parse or the result fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_var)
    }

    /// Build a config from the defaults plus overrides supplied by `lookup`.
    ///
    /// # Errors
    ///
    /// Same as [`EngineConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(v) = parse_f64(&lookup, "FLOWCANVAS_ZOOM_MIN")? {
            cfg.zoom.min = v;
        }
        if let Some(v) = parse_f64(&lookup, "FLOWCANVAS_ZOOM_MAX")? {
            cfg.zoom.max = v;
        }
        if let Some(v) = parse_f64(&lookup, "FLOWCANVAS_WHEEL_SENSITIVITY")? {
            cfg.wheel_zoom_sensitivity = v;
        }
        if let Some(v) = parse_f64(&lookup, "FLOWCANVAS_CLICK_EPSILON_PX")? {
            cfg.click_epsilon_px = v;
        }
        if let Some(v) = parse_f64(&lookup, "FLOWCANVAS_CURVATURE")? {
            cfg.curvature = v;
        }
        if let Some(v) = parse_f64(&lookup, "FLOWCANVAS_FLOW_CYCLE_SECS")? {
            cfg.flow_cycle_secs = v;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for non-positive or inverted zoom bounds and
    /// negative tolerances.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.zoom.min.is_nan() || self.zoom.min <= 0.0 {
            return Err(ConfigError::Invalid { key: "FLOWCANVAS_ZOOM_MIN", reason: "must be positive" });
        }
        if self.zoom.max < self.zoom.min {
            return Err(ConfigError::Invalid { key: "FLOWCANVAS_ZOOM_MAX", reason: "must not be below zoom min" });
        }
        if self.wheel_zoom_sensitivity < 0.0 {
            return Err(ConfigError::Invalid { key: "FLOWCANVAS_WHEEL_SENSITIVITY", reason: "must not be negative" });
        }
        if self.click_epsilon_px < 0.0 {
            return Err(ConfigError::Invalid { key: "FLOWCANVAS_CLICK_EPSILON_PX", reason: "must not be negative" });
        }
        if self.flow_cycle_secs.is_nan() || self.flow_cycle_secs <= 0.0 {
            return Err(ConfigError::Invalid { key: "FLOWCANVAS_FLOW_CYCLE_SECS", reason: "must be positive" });
        }
        Ok(())
    }
}

fn env_var(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(v) => Some(v),
        Err(std::env::VarError::NotPresent) => None,
        Err(e) => {
            tracing::warn!(key, error = %e, "ignoring unreadable config override");
            None
        }
    }
}

fn parse_f64<F>(lookup: &F, key: &str) -> Result<Option<f64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(ConfigError::Parse { key: key.to_owned(), value: raw }),
    }
}
