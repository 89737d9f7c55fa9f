//! Declarative scene description
//!
//! Everything a renderer needs to draw one frame: token styles, connector
//! curves, tooltips and section copy. Produced by
//! [`AttentionEngine::scene`](crate::engine::AttentionEngine::scene).

use anyhow::Result;
use serde::Serialize;

use crate::encoding::{InputTokenStyle, OutputTokenStyle, Tooltip};
use crate::geometry::ConnectorCurve;

/// Label above the input paragraph
pub const INPUT_LABEL: &str = "English Input Paragraph";
/// Output label while the demo runs
pub const DEMO_LABEL: &str = "Demo: Token-by-Token Generation";
/// Output label in exploration mode
pub const EXPLORATION_LABEL: &str = "Exploration Mode: Hover or Click a Word";
/// Hint shown in exploration mode while nothing is active
pub const EXPLORE_HINT: &str =
    "Explore the translation by hovering over or clicking Arabic words above.";
/// Prompt shown while no example is selected
pub const SELECT_PROMPT: &str =
    "Please select a scenario above to see the translation and the model's focus patterns.";

/// Interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// All output tokens visible; hover or click any of them
    Exploration,
    /// Output tokens reveal one step at a time
    Demo,
}

/// One frame of the visualization
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    /// Selected example, if any
    pub example_id: Option<String>,
    pub mode: Mode,
    /// Step driving the input highlights and curves
    pub active_step: Option<usize>,
    pub input_label: String,
    /// Output section label; `None` while no example is selected
    pub output_label: Option<String>,
    /// Centered hint text, if any
    pub placeholder: Option<String>,
    pub inputs: Vec<InputTokenStyle>,
    pub outputs: Vec<OutputTokenStyle>,
    pub curves: Vec<ConnectorCurve>,
    pub tooltips: Vec<Tooltip>,
}

impl Scene {
    /// Whether an example is selected
    pub fn has_example(&self) -> bool {
        self.example_id.is_some()
    }

    /// Serialize as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
