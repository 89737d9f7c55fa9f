//! Flow layout
//!
//! A deterministic stand-in for a browser layout pass. Tokens are laid out as
//! centered, wrapped rows of pills:
//!
//! ```text
//!   [ English Input Paragraph ]
//!   When I arrived at the station, ...        (left-to-right)
//!
//!   [ output label ]
//!   ... وصلتُ عندما                           (right-to-left)
//! ```
//!
//! Emphasized tokens (scaled inputs, active outputs) are grown about their
//! center, so their bounding boxes move the way a CSS transform would move
//! them. Unrevealed outputs keep their slot, so revealing never reflows.

use crate::config::LayoutConfig;
use crate::geometry::{LayoutOracle, Rect};
use crate::scene::Scene;

/// Vertical offset of an unrevealed output token (slides up when revealed)
const HIDDEN_OFFSET: f64 = 16.0;

/// Token boxes for one scene at one viewport width
#[derive(Debug, Clone, PartialEq)]
pub struct FlowLayout {
    container: Rect,
    inputs: Vec<Rect>,
    outputs: Vec<Rect>,
    input_label_y: f64,
    output_label_y: Option<f64>,
    placeholder_y: f64,
}

impl FlowLayout {
    /// Lay out a scene
    pub fn build(scene: &Scene, config: &LayoutConfig) -> Self {
        let width = config.viewport_width.max(2.0 * config.padding + config.char_width);
        let inner = width - 2.0 * config.padding;

        let input_label_y = config.padding;
        let mut y = input_label_y + config.label_height;

        let input_widths: Vec<f64> = scene
            .inputs
            .iter()
            .map(|t| token_width(&t.token, config))
            .collect();
        let (mut inputs, input_bottom) = place_rows(&input_widths, y, inner, false, config);
        for (rect, style) in inputs.iter_mut().zip(&scene.inputs) {
            if style.scaled {
                *rect = rect.scaled(config.emphasis_scale);
            }
        }
        y = input_bottom;

        // Output section is reserved even while idle
        y += config.section_gap;
        let section_top = y;
        y += config.label_height;
        let placeholder_y = y + config.output_min_height / 2.0;

        let mut outputs = Vec::new();
        let mut output_label_y = None;
        if scene.has_example() {
            output_label_y = Some(section_top);
            let output_widths: Vec<f64> = scene
                .outputs
                .iter()
                .map(|t| token_width(&t.token, config))
                .collect();
            let (rects, output_bottom) = place_rows(&output_widths, y, inner, true, config);
            outputs = rects;
            for (rect, style) in outputs.iter_mut().zip(&scene.outputs) {
                if !style.visible {
                    rect.top += HIDDEN_OFFSET;
                } else if style.active {
                    *rect = rect.scaled(config.emphasis_scale);
                }
            }
            y = output_bottom;
        }
        y = y.max(section_top + config.label_height + config.output_min_height);

        let container = Rect::new(0.0, 0.0, width, y + config.padding);
        Self {
            container,
            inputs,
            outputs,
            input_label_y,
            output_label_y,
            placeholder_y,
        }
    }

    pub fn width(&self) -> f64 {
        self.container.width
    }

    pub fn height(&self) -> f64 {
        self.container.height
    }

    /// Baseline of the input section label
    pub fn input_label_y(&self) -> f64 {
        self.input_label_y
    }

    /// Baseline of the output section label, when outputs are shown
    pub fn output_label_y(&self) -> Option<f64> {
        self.output_label_y
    }

    /// Vertical center of the placeholder text
    pub fn placeholder_y(&self) -> f64 {
        self.placeholder_y
    }
}

impl LayoutOracle for FlowLayout {
    fn container(&self) -> Option<Rect> {
        Some(self.container)
    }

    fn measure_input(&self, idx: usize) -> Option<Rect> {
        self.inputs.get(idx).copied()
    }

    fn measure_output(&self, idx: usize) -> Option<Rect> {
        self.outputs.get(idx).copied()
    }
}

/// Pill width for a token
fn token_width(token: &str, config: &LayoutConfig) -> f64 {
    token.chars().count() as f64 * config.char_width + 2.0 * config.token_padding
}

/// Wrap widths into centered rows starting at `top`.
///
/// Returns one rect per width and the y just below the last row.
fn place_rows(
    widths: &[f64],
    top: f64,
    inner: f64,
    rtl: bool,
    config: &LayoutConfig,
) -> (Vec<Rect>, f64) {
    let mut rows: Vec<Vec<usize>> = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut used = 0.0;
    for (idx, &w) in widths.iter().enumerate() {
        let needed = if current.is_empty() { w } else { used + config.column_gap + w };
        if !current.is_empty() && needed > inner {
            rows.push(std::mem::take(&mut current));
            used = w;
        } else {
            used = needed;
        }
        current.push(idx);
    }
    if !current.is_empty() {
        rows.push(current);
    }

    let mut rects = vec![Rect::default(); widths.len()];
    let mut y = top;
    for row in &rows {
        let row_width: f64 = row.iter().map(|&i| widths[i]).sum::<f64>()
            + config.column_gap * row.len().saturating_sub(1) as f64;
        let start = config.padding + (inner - row_width).max(0.0) / 2.0;
        let mut x = if rtl { start + row_width } else { start };
        for &i in row {
            let left = if rtl { x - widths[i] } else { x };
            rects[i] = Rect::new(left, y, widths[i], config.token_height);
            x = if rtl {
                left - config.column_gap
            } else {
                left + widths[i] + config.column_gap
            };
        }
        y += config.token_height + config.row_gap;
    }
    let bottom = if rows.is_empty() { top } else { y - config.row_gap };
    (rects, bottom)
}
