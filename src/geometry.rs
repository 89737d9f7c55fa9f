//! Connector geometry
//!
//! Anchor points are sampled from an injected [`LayoutOracle`], so the
//! geometry pass does not depend on any particular renderer:
//!
//! - source: top-center of the active output token
//! - destination `i`: bottom-center of input token `i`
//!
//! All points are relative to the container's top-left corner. A destination
//! that cannot be measured falls back to the container origin; the next
//! reconcile pass corrects it once the token is laid out.

use serde::Serialize;
use tracing::debug;

use crate::config::VizConfig;
use crate::encoding::connector_visible;

/// A point in container-relative pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    /// Scale about the center, as a CSS `scale()` transform would
    pub fn scaled(&self, factor: f64) -> Self {
        let width = self.width * factor;
        let height = self.height * factor;
        Self {
            left: self.left - (width - self.width) / 2.0,
            top: self.top - (height - self.height) / 2.0,
            width,
            height,
        }
    }
}

/// Measures rendered token boxes in a shared coordinate space
///
/// Returns `None` for anything not currently laid out.
pub trait LayoutOracle {
    /// Bounding box of the container that owns the curve layer
    fn container(&self) -> Option<Rect>;
    /// Bounding box of input token `idx`
    fn measure_input(&self, idx: usize) -> Option<Rect>;
    /// Bounding box of output token `idx`
    fn measure_output(&self, idx: usize) -> Option<Rect>;
}

/// Source and destination anchors for one active step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnchorGeometry {
    /// Output step the anchors were sampled for
    pub step: usize,
    /// Top-center of the active output token
    pub source: Point,
    /// Bottom-center of each input token, by input index
    pub destinations: Vec<Point>,
}

/// Sample anchors for the active step.
///
/// Returns `None` when no step is active, or when the container or the
/// active output token cannot be measured.
pub fn compute_anchors(
    oracle: &dyn LayoutOracle,
    active_step: Option<usize>,
    n_inputs: usize,
) -> Option<AnchorGeometry> {
    let step = active_step?;
    let container = oracle.container()?;
    let Some(out_rect) = oracle.measure_output(step) else {
        debug!("Output token {} not laid out; clearing geometry", step);
        return None;
    };

    let source = Point::new(
        out_rect.center_x() - container.left,
        out_rect.top - container.top,
    );
    let destinations = (0..n_inputs)
        .map(|idx| match oracle.measure_input(idx) {
            Some(r) => Point::new(r.center_x() - container.left, r.bottom() - container.top),
            None => {
                debug!("Input token {} not laid out; anchoring at origin", idx);
                Point::default()
            }
        })
        .collect();

    Some(AnchorGeometry {
        step,
        source,
        destinations,
    })
}

/// A weighted cubic curve from the active output token to one input token
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectorCurve {
    /// Input token index
    pub input: usize,
    /// Attention weight of the edge
    pub weight: f64,
    pub source: Point,
    pub control_source: Point,
    pub control_dest: Point,
    pub dest: Point,
    /// Stroke width (px)
    pub stroke_width: f64,
    /// Stroke opacity in [0, 1]
    pub opacity: f64,
}

impl ConnectorCurve {
    /// SVG path data
    pub fn svg_path(&self) -> String {
        format!(
            "M {:.2} {:.2} C {:.2} {:.2}, {:.2} {:.2}, {:.2} {:.2}",
            self.source.x,
            self.source.y,
            self.control_source.x,
            self.control_source.y,
            self.control_dest.x,
            self.control_dest.y,
            self.dest.x,
            self.dest.y
        )
    }
}

/// Build one curve per input whose weight clears the connector threshold.
///
/// The curve leaves the source upward and enters the destination from below
/// by a fixed `curve_bow`, whatever the distance between them.
pub fn build_curves(
    geometry: &AnchorGeometry,
    weights: &[f64],
    config: &VizConfig,
) -> Vec<ConnectorCurve> {
    let source = geometry.source;
    geometry
        .destinations
        .iter()
        .zip(weights)
        .enumerate()
        .filter(|(_, (_, weight))| connector_visible(**weight, config))
        .map(|(input, (&dest, &weight))| ConnectorCurve {
            input,
            weight,
            source,
            control_source: Point::new(source.x, source.y - config.curve_bow),
            control_dest: Point::new(dest.x, dest.y + config.curve_bow),
            dest,
            stroke_width: (weight * config.stroke_scale).max(config.min_stroke_width),
            opacity: weight.max(config.min_opacity).min(1.0),
        })
        .collect()
}
