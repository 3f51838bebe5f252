//! Configuration for the track scene.
//!
//! Loaded from a RON file at startup; every field falls back to its default
//! when omitted, and the whole file is optional.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use bevy::math::DVec2;
use bevy::prelude::*;
use serde::Deserialize;

use crate::geometry::ForwardCorrection;
use crate::model::ModelSource;
use crate::path_follow::{Easing, PathFollower, DEFAULT_RETRY_DELAY, DEFAULT_SEGMENT_DURATION};
use crate::spline::{
    Parameterization, PathBuilder, DEFAULT_CURVE_SCALE, DEFAULT_SAMPLE_COUNT, MIN_CONTROL_POINTS,
};

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "assets/track.ron";

/// Longest accepted segment duration, in seconds.
pub const MAX_SEGMENT_DURATION: f32 = 3600.0;

/// Built-in track: a small circuit given as longitude/latitude pairs.
pub const DEFAULT_COORDINATES: [(f64, f64); 15] = [
    (-3.68800, 40.45300),
    (-3.68788, 40.45298),
    (-3.68778, 40.45299),
    (-3.68772, 40.45304),
    (-3.68771, 40.45312),
    (-3.68776, 40.45318),
    (-3.68784, 40.45319),
    (-3.68789, 40.45324),
    (-3.68788, 40.45331),
    (-3.68794, 40.45336),
    (-3.68803, 40.45335),
    (-3.68809, 40.45328),
    (-3.68810, 40.45318),
    (-3.68808, 40.45308),
    (-3.68805, 40.45302),
];

/// Camera placement and controls.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Initial camera position.
    pub position: (f32, f32, f32),
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Orbit damping, fraction of angular velocity lost per frame.
    pub damping: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: (12.0, 15.0, 12.0),
            fov_degrees: 50.0,
            near: 0.01,
            far: 500.0,
            damping: 0.05,
        }
    }
}

/// Everything the track scene is built from.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    /// Ordered `(x, z)` control points of the closed track.
    pub coordinates: Vec<(f64, f64)>,
    /// Linear multiplier applied to the raw coordinates.
    pub curve_scale: f64,
    /// Number of samples along the closed spline.
    pub sample_count: usize,
    /// Knot parameterization of the spline.
    pub parameterization: Parameterization,
    /// Seconds per segment.
    pub segment_duration: f32,
    /// Interpolation profile of the position tweens.
    pub easing: Easing,
    /// Seconds before a failed follower start is retried.
    pub retry_delay: f32,
    /// Model of the tracked object.
    pub model: ModelSource,
    /// Uniform scale of the tracked object.
    pub model_scale: f32,
    /// Rotation applied after the tracked object faces its next sample.
    pub forward_correction: ForwardCorrection,
    pub camera: CameraConfig,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            coordinates: DEFAULT_COORDINATES.to_vec(),
            curve_scale: DEFAULT_CURVE_SCALE,
            sample_count: DEFAULT_SAMPLE_COUNT,
            parameterization: Parameterization::default(),
            segment_duration: DEFAULT_SEGMENT_DURATION,
            easing: Easing::Linear,
            retry_delay: DEFAULT_RETRY_DELAY,
            model: ModelSource::default(),
            model_scale: 1.0,
            forward_correction: ForwardCorrection::default(),
            camera: CameraConfig::default(),
        }
    }
}

impl TrackConfig {
    /// Parse and validate a RON document.
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate the RON file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_ron_str(&source)
    }

    /// Like [`load`](Self::load), but a missing file yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(source) => Self::from_ron_str(&source),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ConfigError::Io {
                path: path.display().to_string(),
                message: e.to_string(),
            }),
        }
    }

    /// Check that the values describe a drivable track.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.coordinates.len() < MIN_CONTROL_POINTS {
            return Err(ConfigError::InvalidCount {
                field: "coordinates",
                value: self.coordinates.len(),
                min: MIN_CONTROL_POINTS,
            });
        }
        if self.sample_count == 0 {
            return Err(ConfigError::InvalidCount {
                field: "sample_count",
                value: self.sample_count,
                min: 1,
            });
        }

        let positive = [
            ("curve_scale", self.curve_scale),
            ("segment_duration", self.segment_duration as f64),
            ("model_scale", self.model_scale as f64),
            ("camera.near", self.camera.near as f64),
            ("camera.far", self.camera.far as f64),
            ("camera.fov_degrees", self.camera.fov_degrees as f64),
        ];
        for (field, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        if self.segment_duration > MAX_SEGMENT_DURATION {
            return Err(ConfigError::OutOfRange {
                field: "segment_duration",
                value: self.segment_duration,
                min: 0.0,
                max: MAX_SEGMENT_DURATION,
            });
        }
        if !(0.0..=1.0).contains(&self.camera.damping) {
            return Err(ConfigError::OutOfRange {
                field: "camera.damping",
                value: self.camera.damping,
                min: 0.0,
                max: 1.0,
            });
        }
        if self.retry_delay < 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "retry_delay",
                value: self.retry_delay,
                min: 0.0,
                max: f32::MAX,
            });
        }

        Ok(())
    }

    /// Control points as 2D vectors.
    pub fn control_points(&self) -> Vec<DVec2> {
        self.coordinates
            .iter()
            .map(|&(x, z)| DVec2::new(x, z))
            .collect()
    }

    /// Path builder configured from this file.
    pub fn path_builder(&self) -> PathBuilder {
        PathBuilder::new(self.sample_count)
            .with_scale(self.curve_scale)
            .with_parameterization(self.parameterization)
    }

    /// Follower for `path` configured from this file.
    pub fn follower(&self, path: Entity) -> PathFollower {
        PathFollower::new(path)
            .with_segment_duration(self.segment_duration)
            .with_easing(self.easing)
            .with_correction(self.forward_correction)
            .with_retry_delay(self.retry_delay)
    }
}

/// Configuration loading or validation error.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The file could not be read.
    Io { path: String, message: String },
    /// The file is not valid RON for [`TrackConfig`].
    Parse { message: String },
    /// A count is below its minimum.
    InvalidCount {
        field: &'static str,
        value: usize,
        min: usize,
    },
    /// A value that must be strictly positive and finite is not.
    NotPositive { field: &'static str, value: f64 },
    /// A parameter is outside its valid range.
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, message } => {
                write!(f, "cannot read {}: {}", path, message)
            }
            ConfigError::Parse { message } => write!(f, "invalid track config: {}", message),
            ConfigError::InvalidCount { field, value, min } => {
                write!(f, "{} must be >= {}, got {}", field, min, value)
            }
            ConfigError::NotPositive { field, value } => {
                write!(f, "{} must be > 0, got {}", field, value)
            }
            ConfigError::OutOfRange {
                field,
                value,
                min,
                max,
            } => {
                write!(f, "{} must be in [{}, {}], got {}", field, min, max, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
