//! Scene rendering
//!
//! Two sinks for a [`Scene`]: a standalone SVG document drawn over a
//! [`FlowLayout`], and a plain-text summary for terminals and logs.

use anyhow::Result;
use std::fmt::Write;

use crate::encoding::{percent, InputTokenStyle, OutputTokenStyle, Tooltip, TooltipAnchor};
use crate::geometry::{LayoutOracle, Rect};
use crate::layout::FlowLayout;
use crate::scene::Scene;

const ACCENT: &str = "#2563eb";
const ACCENT_RING: &str = "#93c5fd";
const INK: &str = "#1e293b";
const MUTED: &str = "#64748b";
const BORDER: &str = "#cbd5e1";
const TOOLTIP_BG: &str = "#0f172a";

const FONT: &str = "font-family=\"system-ui, sans-serif\" font-size=\"15\"";
const CORNER_RADIUS: f64 = 8.0;
const TOOLTIP_LINE: f64 = 16.0;
const TOOLTIP_CHAR: f64 = 7.0;
const TOOLTIP_PAD: f64 = 8.0;

/// Escape text for use in SVG content and attribute values
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a scene as an SVG document
pub fn render_svg(scene: &Scene, layout: &FlowLayout) -> Result<String> {
    let (width, height) = (layout.width(), layout.height());
    let mut out = String::new();
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}">"#,
        w = width,
        h = height
    )?;
    writeln!(
        out,
        r#"  <defs><filter id="shadow" x="-20%" y="-20%" width="140%" height="160%"><feDropShadow dx="0" dy="2" stdDeviation="2" flood-opacity="0.25"/></filter></defs>"#
    )?;
    writeln!(out, r#"  <rect width="100%" height="100%" fill="white"/>"#)?;

    write_label(&mut out, &scene.input_label, layout.input_label_y())?;
    if let (Some(label), Some(y)) = (&scene.output_label, layout.output_label_y()) {
        write_label(&mut out, label, y)?;
    }

    writeln!(out, r#"  <g id="connectors" fill="none" stroke="{ACCENT}" stroke-linecap="round">"#)?;
    for curve in &scene.curves {
        writeln!(
            out,
            r#"    <path d="{}" stroke-width="{:.2}" opacity="{:.3}"/>"#,
            curve.svg_path(),
            curve.stroke_width,
            curve.opacity
        )?;
    }
    writeln!(out, "  </g>")?;

    writeln!(out, r#"  <g id="inputs" {FONT}>"#)?;
    // Hovered token last so it paints above its neighbours
    let (hovered, rest): (Vec<_>, Vec<_>) = scene.inputs.iter().partition(|s| s.hovered);
    for style in rest.into_iter().chain(hovered) {
        if let Some(rect) = layout.measure_input(style.index) {
            write_input(&mut out, style, rect)?;
        }
    }
    writeln!(out, "  </g>")?;

    writeln!(out, r#"  <g id="outputs" {FONT} direction="rtl">"#)?;
    for style in scene.outputs.iter().filter(|s| s.visible) {
        if let Some(rect) = layout.measure_output(style.index) {
            write_output(&mut out, style, rect)?;
        }
    }
    writeln!(out, "  </g>")?;

    if let Some(text) = &scene.placeholder {
        writeln!(
            out,
            r#"  <text x="{:.1}" y="{:.1}" text-anchor="middle" dominant-baseline="middle" fill="{MUTED}" font-style="italic" {FONT}>{}</text>"#,
            width / 2.0,
            layout.placeholder_y(),
            escape_xml(text)
        )?;
    }

    for tooltip in &scene.tooltips {
        let rect = match tooltip.anchor {
            TooltipAnchor::Input(idx) => layout.measure_input(idx),
            TooltipAnchor::Output(idx) => layout.measure_output(idx),
        };
        if let Some(rect) = rect {
            write_tooltip(&mut out, tooltip, rect, width)?;
        }
    }

    writeln!(out, "</svg>")?;
    Ok(out)
}

fn write_label(out: &mut String, label: &str, y: f64) -> Result<()> {
    writeln!(
        out,
        r#"  <text x="50%" y="{:.1}" text-anchor="middle" font-family="system-ui, sans-serif" font-size="13" font-weight="600" fill="{MUTED}" letter-spacing="1">{}</text>"#,
        y + 16.0,
        escape_xml(&label.to_uppercase())
    )?;
    Ok(())
}

fn write_input(out: &mut String, style: &InputTokenStyle, rect: Rect) -> Result<()> {
    let stroke = if style.hovered {
        format!(r#" stroke="{ACCENT}" stroke-width="2""#)
    } else if style.borderless {
        String::new()
    } else {
        format!(r#" stroke="{BORDER}" stroke-width="1""#)
    };
    let shadow = if style.shadowed { r#" filter="url(#shadow)""# } else { "" };
    writeln!(
        out,
        r#"    <rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" rx="{CORNER_RADIUS}" fill="rgba(37, 99, 235, {:.3})"{stroke}{shadow}/>"#,
        rect.left, rect.top, rect.width, rect.height, style.fill_intensity
    )?;
    let fill = if style.light_text { "white" } else { INK };
    let weight = if style.strong { "700" } else { "400" };
    writeln!(
        out,
        r#"    <text x="{:.1}" y="{:.1}" text-anchor="middle" dominant-baseline="central" fill="{fill}" font-weight="{weight}">{}</text>"#,
        rect.center_x(),
        rect.top + rect.height / 2.0,
        escape_xml(&style.token)
    )?;
    Ok(())
}

fn write_output(out: &mut String, style: &OutputTokenStyle, rect: Rect) -> Result<()> {
    let (fill, stroke, stroke_width) = if style.active {
        (ACCENT, ACCENT_RING, 3)
    } else {
        (INK, "none", 0)
    };
    writeln!(
        out,
        r#"    <g opacity="{:.2}"><rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" rx="{CORNER_RADIUS}" fill="{fill}" stroke="{stroke}" stroke-width="{stroke_width}"/><text x="{:.1}" y="{:.1}" text-anchor="middle" dominant-baseline="central" fill="white">{}</text></g>"#,
        style.opacity,
        rect.left,
        rect.top,
        rect.width,
        rect.height,
        rect.center_x(),
        rect.top + rect.height / 2.0,
        escape_xml(&style.token)
    )?;
    Ok(())
}

fn write_tooltip(out: &mut String, tooltip: &Tooltip, anchor: Rect, canvas_width: f64) -> Result<()> {
    let rows: Vec<&str> = tooltip
        .title
        .iter()
        .map(String::as_str)
        .chain(tooltip.lines.iter().map(String::as_str))
        .collect();
    let longest = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
    let width = longest as f64 * TOOLTIP_CHAR + 2.0 * TOOLTIP_PAD;
    let height = rows.len() as f64 * TOOLTIP_LINE + 2.0 * TOOLTIP_PAD;
    let left = (anchor.center_x() - width / 2.0).clamp(0.0, (canvas_width - width).max(0.0));
    let top = (anchor.top - height - 8.0).max(0.0);

    writeln!(
        out,
        r#"  <g class="tooltip" font-family="system-ui, sans-serif" font-size="12"><rect x="{left:.1}" y="{top:.1}" width="{width:.1}" height="{height:.1}" rx="6" fill="{TOOLTIP_BG}"/>"#
    )?;
    for (i, row) in rows.iter().enumerate() {
        let weight = if i == 0 && tooltip.title.is_some() { "700" } else { "400" };
        writeln!(
            out,
            r#"    <text x="{:.1}" y="{:.1}" fill="white" font-weight="{weight}">{}</text>"#,
            left + TOOLTIP_PAD,
            top + TOOLTIP_PAD + (i as f64 + 0.8) * TOOLTIP_LINE,
            escape_xml(row)
        )?;
    }
    writeln!(out, "  </g>")?;
    Ok(())
}

/// Render a scene as plain text.
///
/// Inputs carrying weight are suffixed with their percentage, the active
/// output is bracketed, dimmed outputs are parenthesized and unrevealed
/// outputs print as `…`.
pub fn render_text(scene: &Scene) -> String {
    let mut out = String::new();

    out.push_str(&format!("[{}]\n", scene.input_label));
    let inputs: Vec<String> = scene
        .inputs
        .iter()
        .map(|s| match percent(s.fill_intensity) {
            0 => s.token.clone(),
            p => format!("{}({}%)", s.token, p),
        })
        .collect();
    out.push_str(&inputs.join(" "));
    out.push('\n');

    if let Some(label) = &scene.output_label {
        out.push_str(&format!("\n[{}]\n", label));
        let outputs: Vec<String> = scene
            .outputs
            .iter()
            .map(|s| {
                if !s.visible {
                    "…".to_string()
                } else if s.active {
                    format!("[{}]", s.token)
                } else if s.dimmed {
                    format!("({})", s.token)
                } else {
                    s.token.clone()
                }
            })
            .collect();
        out.push_str(&outputs.join(" "));
        out.push('\n');
    }

    if let Some(step) = scene.active_step {
        out.push_str(&format!(
            "\nActive step {}: {} connector(s)\n",
            step,
            scene.curves.len()
        ));
    }

    for tooltip in &scene.tooltips {
        let target = match tooltip.anchor {
            TooltipAnchor::Input(i) => format!("input {}", i),
            TooltipAnchor::Output(i) => format!("output {}", i),
        };
        match &tooltip.title {
            Some(title) => out.push_str(&format!("Tooltip ({}): {}\n", target, title)),
            None => out.push_str(&format!("Tooltip ({}):\n", target)),
        }
        for line in &tooltip.lines {
            out.push_str(&format!("  {}\n", line));
        }
    }

    if let Some(text) = &scene.placeholder {
        out.push_str(&format!("\n{}\n", text));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Mode, INPUT_LABEL, SELECT_PROMPT};

    fn input(index: usize, token: &str, weight: f64) -> InputTokenStyle {
        InputTokenStyle {
            index,
            token: token.to_string(),
            fill_intensity: weight,
            strong: weight > 0.5,
            notable: weight > 0.3,
            scaled: weight > 0.5,
            shadowed: weight > 0.3,
            light_text: weight > 0.4,
            borderless: weight > 0.2,
            hovered: false,
        }
    }

    fn idle_scene() -> Scene {
        Scene {
            example_id: None,
            mode: Mode::Exploration,
            active_step: None,
            input_label: INPUT_LABEL.to_string(),
            output_label: None,
            placeholder: Some(SELECT_PROMPT.to_string()),
            inputs: vec![input(0, "bat", 0.0), input(1, "<cave>", 0.0)],
            outputs: Vec::new(),
            curves: Vec::new(),
            tooltips: Vec::new(),
        }
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml(r#"a<b & "c"'"#), "a&lt;b &amp; &quot;c&quot;&apos;");
        assert_eq!(escape_xml("خفاشًا."), "خفاشًا.");
    }

    #[test]
    fn test_idle_svg() {
        let scene = idle_scene();
        let layout = FlowLayout::build(&scene, &Default::default());
        let svg = render_svg(&scene, &layout).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("&lt;cave&gt;"));
        assert!(svg.contains("ENGLISH INPUT PARAGRAPH"));
        assert!(svg.contains("Please select a scenario"));
        assert!(!svg.contains("<path"));
    }

    #[test]
    fn test_text_marks_weights() {
        let mut scene = idle_scene();
        scene.inputs = vec![input(0, "bat", 0.42), input(1, "cave", 0.0)];
        let text = render_text(&scene);
        assert!(text.contains("bat(42%) cave"));
        assert!(text.contains(SELECT_PROMPT));
    }
}
