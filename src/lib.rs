// Pedantic clippy configuration for a geometry/visualization codebase
#![allow(clippy::cast_precision_loss)] // usize→f64 for pixel positions
#![allow(clippy::cast_possible_truncation)] // f64→i64 when rounding percentages
#![allow(clippy::cast_sign_loss)] // rounded weights are known non-negative
#![allow(clippy::similar_names)] // related variables like `input`/`inputs`
#![allow(clippy::module_name_repetitions)] // LayoutConfig in config.rs is fine
// Documentation pedantic:
#![allow(clippy::doc_markdown)] // backticks for every technical term is excessive
#![allow(clippy::missing_errors_doc)] // # Errors section for every Result fn
#![allow(clippy::missing_panics_doc)] // # Panics section for every panic
// Method style pedantic:
#![allow(clippy::must_use_candidate)] // #[must_use] on every pure fn is excessive
#![allow(clippy::return_self_not_must_use)] // builder methods on ExampleBuilder
#![allow(clippy::struct_excessive_bools)] // token styles are sets of flags

//! attnviz-rs: an attention visualization engine
//!
//! Shows which input tokens a translation model attends to while producing
//! each output token: input highlights scaled by attention weight, curved
//! connectors from the active output token to its inputs, and a step-through
//! demo that reveals the translation one token at a time.
//!
//! ## Architecture
//!
//! - `dataset`: Examples, attention steps and construction-time normalization
//! - `builtin`: The two built-in scenarios over the fixed English paragraph
//! - `stepper`: Selection and step-through demo controller
//! - `interaction`: Hover/click state and active-step resolution
//! - `encoding`: Weight-to-visual encodings, top context and tooltips
//! - `geometry`: Layout oracle, anchor sampling and connector curves
//! - `reconcile`: Cancellable deferred geometry pass on a virtual clock
//! - `engine`: AttentionEngine tying interaction, geometry and scenes together
//! - `scene`: Serializable frame description
//! - `layout`: Deterministic wrapped-row layout implementing the oracle
//! - `render`: SVG and plain-text rendering
//! - `shell`: Page-level controls and scripted sessions
//! - `config`: Thresholds, styling and layout metrics

pub mod builtin;
pub mod config;
pub mod dataset;
pub mod encoding;
pub mod engine;
pub mod geometry;
pub mod interaction;
pub mod layout;
pub mod reconcile;
pub mod render;
pub mod scene;
pub mod shell;
pub mod stepper;

pub use builtin::{ATTENTION_ID, SEQUENTIAL_ID};
pub use config::{LayoutConfig, VizConfig};
pub use dataset::{AttentionStep, Dataset, DatasetIssue, Example, ExampleBuilder};
pub use encoding::{
    input_styles, output_styles, top_context, ContextEntry, InputTokenStyle, OutputTokenStyle,
    Tooltip, TooltipAnchor,
};
pub use engine::AttentionEngine;
pub use geometry::{
    build_curves, compute_anchors, AnchorGeometry, ConnectorCurve, LayoutOracle, Point, Rect,
};
pub use interaction::{resolve_active_step, InteractionState};
pub use layout::FlowLayout;
pub use reconcile::{ReconcileTimer, TaskHandle};
pub use render::{render_svg, render_text};
pub use scene::{Mode, Scene};
pub use shell::{parse_script, Command, Shell};
pub use stepper::StepperState;
