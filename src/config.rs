//! Configuration for the layout engine and the CLI pipeline.
//!
//! [`AppConfig`] is loaded from an optional TOML file; every field has a
//! default so a missing section falls back to the constants the editor
//! surface has always used.

use std::{fs, path::Path};

use serde::Deserialize;

use crate::error::DagEditError;

/// Application configuration loaded from a TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutOptions,
}

impl AppConfig {
    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutOptions {
        &self.layout
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DagEditError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(DagEditError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|err| DagEditError::Config(format!("Invalid config file: {err}")))
    }

    /// Load configuration from an optional path, defaulting when absent.
    pub fn load_optional(path: Option<&str>) -> Result<Self, DagEditError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

/// Spacing and footprint options for the layout engine.
///
/// The footprint is the fixed width × height reserved per node so that
/// placements never visually overlap.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Nominal node width.
    pub node_width: f32,

    /// Nominal node height.
    pub node_height: f32,

    /// Horizontal gap between consecutive ranks.
    pub rank_spacing: f32,

    /// Vertical gap between nodes within a rank.
    pub node_spacing: f32,

    /// Offset of the drawing from the canvas origin.
    pub margin: f32,

    /// Number of barycenter sweeps used for crossing reduction.
    pub ordering_iterations: usize,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            node_width: 172.0,
            node_height: 36.0,
            rank_spacing: 50.0,
            node_spacing: 50.0,
            margin: 20.0,
            ordering_iterations: 4,
        }
    }
}
