//! Visualization configuration
//!
//! Thresholds and styling constants for the weight encodings and connector
//! curves, the reconcile delay, and the metrics used by [`crate::layout`].

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the attention rendering engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VizConfig {
    /// Curves are drawn only to inputs with weight above this
    pub connector_threshold: f64,
    /// Tooltip context lists only inputs with weight above this
    pub context_threshold: f64,
    /// Maximum number of context tokens in the output tooltip
    pub context_top_k: usize,
    /// Weight above which an input token is scaled up
    pub strong_threshold: f64,
    /// Weight above which an input token gets a drop shadow
    pub notable_threshold: f64,
    /// Weight above which input text switches to the light color
    pub light_text_threshold: f64,
    /// Weight above which the input token border is hidden
    pub borderless_threshold: f64,
    /// Vertical control-point offset for connector curves (px)
    pub curve_bow: f64,
    /// Minimum connector stroke width (px)
    pub min_stroke_width: f64,
    /// Stroke width per unit of weight (px)
    pub stroke_scale: f64,
    /// Minimum connector opacity
    pub min_opacity: f64,
    /// Opacity of revealed but inactive output tokens
    pub dim_opacity: f64,
    /// Delay before the follow-up geometry pass (ms)
    pub reconcile_delay_ms: u64,
    /// Layout metrics
    pub layout: LayoutConfig,
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            connector_threshold: 0.02,
            context_threshold: 0.02,
            context_top_k: 3,
            strong_threshold: 0.5,
            notable_threshold: 0.3,
            light_text_threshold: 0.4,
            borderless_threshold: 0.2,
            curve_bow: 120.0,
            min_stroke_width: 1.5,
            stroke_scale: 15.0,
            min_opacity: 0.15,
            dim_opacity: 0.2,
            reconcile_delay_ms: 100,
            layout: LayoutConfig::default(),
        }
    }
}

impl VizConfig {
    /// Load configuration from a JSON file; missing fields keep their defaults
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {path}"))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config {path}"))?;
        Ok(config)
    }

    /// Reconcile delay as a [`Duration`]
    pub fn reconcile_delay(&self) -> Duration {
        Duration::from_millis(self.reconcile_delay_ms)
    }
}

/// Metrics for the flow layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Container width (px)
    pub viewport_width: f64,
    /// Inner padding of the container (px)
    pub padding: f64,
    /// Average glyph advance (px)
    pub char_width: f64,
    /// Horizontal padding inside a token pill (px)
    pub token_padding: f64,
    /// Token pill height (px)
    pub token_height: f64,
    /// Horizontal gap between pills (px)
    pub column_gap: f64,
    /// Vertical gap between wrapped rows (px)
    pub row_gap: f64,
    /// Height reserved for a section label (px)
    pub label_height: f64,
    /// Vertical space between the input and output sections (px)
    pub section_gap: f64,
    /// Minimum height of the output area (px)
    pub output_min_height: f64,
    /// Scale applied to emphasized tokens
    pub emphasis_scale: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1024.0,
            padding: 40.0,
            char_width: 9.0,
            token_padding: 12.0,
            token_height: 36.0,
            column_gap: 12.0,
            row_gap: 12.0,
            label_height: 32.0,
            section_gap: 128.0,
            output_min_height: 120.0,
            emphasis_scale: 1.1,
        }
    }
}
