//! Integration tests for attnviz-rs
//!
//! Cover dataset/config loading from disk and full sessions driven through
//! the shell with the built-in scenarios.

use attnviz_rs::{
    parse_script, Command, Dataset, DatasetIssue, FlowLayout, LayoutOracle, Shell, VizConfig,
    ATTENTION_ID, SEQUENTIAL_ID,
};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

fn builtin_shell() -> Shell {
    Shell::new(Arc::new(Dataset::builtin()), VizConfig::default())
}

/// Test dataset loading from JSON with dense, sparse and malformed steps
#[test]
fn test_dataset_loading() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"{{
        "examples": [
            {{
                "id": "tiny",
                "name": "Tiny",
                "input_text": "the bat flew",
                "output_steps": [
                    {{"output_token": "le", "weights": [2.0, 1.0, 1.0]}},
                    {{"output_token": "chauve-souris", "weights": {{"1": 0.6, "2": 0.2, "9": 0.2}}}},
                    {{"output_token": "vola", "weights": [0.0, 0.0]}}
                ]
            }}
        ]
    }}"#
    )
    .unwrap();

    let dataset = Dataset::load(file.path().to_str().unwrap()).unwrap();
    assert_eq!(dataset.len(), 1);
    let example = dataset.get("tiny").unwrap();
    assert_eq!(example.input_tokens, vec!["the", "bat", "flew"]);
    assert_eq!(example.n_steps(), 3);

    let first = example.weights(0).unwrap();
    assert!((first[0] - 0.5).abs() < 1e-6);

    // Out-of-range target 9 is dropped before normalization
    let second = example.weights(1).unwrap();
    assert!((second[1] - 0.75).abs() < 1e-6);
    assert!((second[2] - 0.25).abs() < 1e-6);

    // Wrong length falls back to uniform
    let third = example.weights(2).unwrap();
    assert!(third.iter().all(|w| (w - 1.0 / 3.0).abs() < 1e-6));

    assert!(dataset
        .issues()
        .iter()
        .any(|i| matches!(i, DatasetIssue::TargetOutOfRange { .. })));
    assert!(dataset
        .issues()
        .iter()
        .any(|i| matches!(i, DatasetIssue::LengthMismatch { .. })));
}

/// Test that a missing dataset file is an error with the path in context
#[test]
fn test_dataset_missing_file() {
    let err = Dataset::load("/nonexistent/attnviz/dataset.json").unwrap_err();
    assert!(format!("{err:#}").contains("/nonexistent/attnviz/dataset.json"));
}

/// Test partial config files keep the remaining defaults
#[test]
fn test_config_loading() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"{{
        "connector_threshold": 0.1,
        "reconcile_delay_ms": 250,
        "layout": {{"viewport_width": 640.0}}
    }}"#
    )
    .unwrap();

    let config = VizConfig::load(file.path().to_str().unwrap()).unwrap();
    assert!((config.connector_threshold - 0.1).abs() < 1e-9);
    assert_eq!(config.reconcile_delay_ms, 250);
    assert!((config.layout.viewport_width - 640.0).abs() < 1e-9);
    assert_eq!(config.context_top_k, 3);
    assert!((config.layout.padding - 40.0).abs() < 1e-9);
}

/// Every built-in weight vector is normalized and matches the paragraph length
#[test]
fn test_builtin_dataset_invariants() {
    let dataset = Dataset::builtin();
    for example in dataset.examples() {
        for step in &example.output_steps {
            assert_eq!(step.weights.len(), example.input_tokens.len());
            let sum: f64 = step.weights.iter().sum();
            assert!((sum - 1.0).abs() < 1e-6);
        }
    }
}

/// Select, start and advance three times: four tokens revealed, pill on step 3
#[test]
fn test_demo_scenario_reveal() {
    let mut shell = builtin_shell();
    let script = parse_script(&format!("select {ATTENTION_ID}; start; next; next; next")).unwrap();
    shell.run(&script).unwrap();

    assert_eq!(shell.stepper().current_step(), Some(3));
    let scene = shell.scene();
    assert_eq!(scene.active_step, Some(3));
    for output in &scene.outputs {
        assert_eq!(output.visible, output.index <= 3, "token {}", output.index);
        assert_eq!(output.active, output.index == 3, "token {}", output.index);
    }
    assert!(scene.outputs[..3].iter().all(|o| o.dimmed));
    assert!(scene.outputs[4..].iter().all(|o| (o.opacity - 0.0).abs() < 1e-9));
}

/// Advancing past the end is a no-op
#[test]
fn test_demo_never_passes_last_step() {
    let mut shell = builtin_shell();
    shell.apply(&Command::Select(ATTENTION_ID.to_string())).unwrap();
    shell.apply(&Command::Start).unwrap();
    for _ in 0..100 {
        shell.apply(&Command::Next).unwrap();
    }
    assert_eq!(shell.stepper().current_step(), Some(54));
    assert!(shell.stepper().is_finished());
}

/// Switching examples while a pin is active clears it
#[test]
fn test_switch_example_clears_pin() {
    let mut shell = builtin_shell();
    let script = parse_script(&format!(
        "select {ATTENTION_ID}; click-output 54; select {SEQUENTIAL_ID}"
    ))
    .unwrap();
    shell.run(&script).unwrap();

    assert_eq!(shell.engine().interaction().clicked_output, None);
    assert!(shell.engine().pending_reconcile().is_none());
    let scene = shell.scene();
    assert_eq!(scene.example_id.as_deref(), Some(SEQUENTIAL_ID));
    assert_eq!(scene.active_step, None);
    assert!(scene.curves.is_empty());
}

/// Selecting the same example twice deselects it
#[test]
fn test_select_twice_deselects() {
    let mut shell = builtin_shell();
    let script = parse_script(&format!("select {ATTENTION_ID}; select {ATTENTION_ID}")).unwrap();
    shell.run(&script).unwrap();
    assert!(shell.stepper().selected_example().is_none());
    assert!(!shell.scene().has_example());
}

/// Hover beats the pin, the pin beats the demo step
#[test]
fn test_resolution_priority_through_shell() {
    let mut shell = builtin_shell();
    let script = parse_script(&format!(
        "select {ATTENTION_ID}; start; next; next; next; next; next; next; next; \
         click-output 2; hover-output 5"
    ))
    .unwrap();
    shell.run(&script).unwrap();
    assert_eq!(shell.scene().active_step, Some(5));

    shell.apply(&Command::LeaveOutput).unwrap();
    assert_eq!(shell.scene().active_step, Some(2));

    shell.apply(&Command::ClickOutput(2)).unwrap();
    assert_eq!(shell.scene().active_step, Some(7));
}

/// Curves leave the active output's top edge and land on input bottoms
#[test]
fn test_curves_follow_layout() {
    let mut shell = builtin_shell();
    let script = parse_script(&format!("select {ATTENTION_ID}; click-output 7; wait 100")).unwrap();
    shell.run(&script).unwrap();

    let scene = shell.scene();
    let layout = FlowLayout::build(&scene, &VizConfig::default().layout);
    let source = layout.measure_output(7).unwrap();
    assert!(!scene.curves.is_empty());
    for curve in &scene.curves {
        assert!(curve.weight > 0.02);
        assert!((curve.source.y - source.top).abs() < 1e-6);
        let dest = layout.measure_input(curve.input).unwrap();
        assert!((curve.dest.y - dest.bottom()).abs() < 1e-6);
        assert!((curve.dest.x - dest.center_x()).abs() < 1e-6);
    }
}

/// Input tooltip appears only while a step is active
#[test]
fn test_input_tooltip_requires_active_step() {
    let mut shell = builtin_shell();
    shell.run(&parse_script(&format!("select {ATTENTION_ID}; hover-input 12")).unwrap())
        .unwrap();
    assert!(shell.scene().tooltips.is_empty());

    shell.apply(&Command::HoverOutput(7)).unwrap();
    let scene = shell.scene();
    assert!(scene
        .tooltips
        .iter()
        .any(|t| t.lines.iter().any(|l| l.starts_with("Attention Weight: "))));
    assert!(scene
        .tooltips
        .iter()
        .any(|t| t.title.as_deref() == Some("Model Context") && t.lines.len() == 3));
}

/// The local and global scenarios disagree on the first "bat"
#[test]
fn test_bat_translation_differs() {
    let dataset = Dataset::builtin();
    let local = dataset.get(SEQUENTIAL_ID).unwrap();
    let global = dataset.get(ATTENTION_ID).unwrap();
    assert_ne!(
        local.step(7).unwrap().output_token,
        global.step(7).unwrap().output_token
    );
}

/// Full render of a running session
#[test]
fn test_render_outputs() {
    let mut shell = builtin_shell();
    shell.run(&parse_script(&format!("select {ATTENTION_ID}; start; next; wait 100")).unwrap())
        .unwrap();

    let svg = shell.render_svg().unwrap();
    assert!(svg.contains("<path d=\"M "));
    assert!(svg.contains("DEMO: TOKEN-BY-TOKEN GENERATION"));

    let text = shell.render_text();
    assert!(text.contains("Generate Next Word"));
    assert!(text.contains("Step 2/55"));

    let json: serde_json::Value = serde_json::from_str(&shell.scene().to_json().unwrap()).unwrap();
    assert_eq!(json["mode"], "demo");
    assert_eq!(json["active_step"], 1);
}
