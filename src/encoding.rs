//! Weight-to-visual encodings
//!
//! Maps the active step's weight vector onto per-token style parameters,
//! decides output token visibility, and derives tooltip payloads.
//!
//! ## Input tokens
//!
//! | Channel | Rule |
//! |---|---|
//! | fill intensity | the weight itself |
//! | scale-up | weight > `strong_threshold`, or hovered |
//! | drop shadow | weight > `notable_threshold`, or hovered |
//! | light text | weight > `light_text_threshold` |
//! | no border | weight > `borderless_threshold` |
//!
//! ## Output tokens
//!
//! Reveal, active and dimmed states compose independently: a token is active
//! when it is hovered, pinned, or the running demo's current step, regardless
//! of which of those wins active-step resolution.

use serde::Serialize;

use crate::config::VizConfig;
use crate::dataset::Example;
use crate::interaction::InteractionState;
use crate::stepper::StepperState;

/// Whether a curve to an input with this weight is drawn
pub fn connector_visible(weight: f64, config: &VizConfig) -> bool {
    weight > config.connector_threshold
}

/// Weight vector shown for the active step, or all zeros when none is active
pub fn visible_weights(example: &Example, active_step: Option<usize>) -> Vec<f64> {
    active_step
        .and_then(|idx| example.weights(idx))
        .map_or_else(|| vec![0.0; example.n_inputs()], <[f64]>::to_vec)
}

/// Style parameters for one input token
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputTokenStyle {
    pub index: usize,
    pub token: String,
    /// Fill opacity in [0, 1]
    pub fill_intensity: f64,
    /// Weight above the strong threshold
    pub strong: bool,
    /// Weight above the notable threshold
    pub notable: bool,
    /// Scaled up (strong or hovered)
    pub scaled: bool,
    /// Drop shadow (notable or hovered)
    pub shadowed: bool,
    /// Text drawn in the light color
    pub light_text: bool,
    /// Border hidden
    pub borderless: bool,
    /// Under the pointer; drawn above its neighbours
    pub hovered: bool,
}

/// Style every input token from the visible weight vector
pub fn input_styles(
    tokens: &[String],
    weights: &[f64],
    hovered_input: Option<usize>,
    config: &VizConfig,
) -> Vec<InputTokenStyle> {
    tokens
        .iter()
        .enumerate()
        .map(|(index, token)| {
            let weight = weights.get(index).copied().unwrap_or(0.0);
            let hovered = hovered_input == Some(index);
            let strong = weight > config.strong_threshold;
            let notable = weight > config.notable_threshold;
            InputTokenStyle {
                index,
                token: token.clone(),
                fill_intensity: weight.clamp(0.0, 1.0),
                strong,
                notable,
                scaled: strong || hovered,
                shadowed: notable || hovered,
                light_text: weight > config.light_text_threshold,
                borderless: weight > config.borderless_threshold,
                hovered,
            }
        })
        .collect()
}

/// Whether output token `idx` is revealed.
///
/// In demo mode tokens reveal in order up to the current step; in
/// exploration mode every token is revealed.
pub fn is_revealed(stepper: &StepperState, idx: usize) -> bool {
    if stepper.is_translating() {
        stepper.current_step().is_some_and(|current| idx <= current)
    } else {
        true
    }
}

/// Style parameters for one output token
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputTokenStyle {
    pub index: usize,
    pub token: String,
    /// Revealed (demo progress or exploration mode)
    pub visible: bool,
    /// Hovered, pinned, or the demo's current step
    pub active: bool,
    /// Revealed but not active
    pub dimmed: bool,
    pub hovered: bool,
    pub pinned: bool,
    /// Effective opacity after composing the three states
    pub opacity: f64,
}

/// Style every output token of the selected example
pub fn output_styles(
    example: &Example,
    stepper: &StepperState,
    interaction: &InteractionState,
    config: &VizConfig,
) -> Vec<OutputTokenStyle> {
    let demo_step = stepper
        .current_step()
        .filter(|_| stepper.is_translating());

    example
        .output_steps
        .iter()
        .enumerate()
        .map(|(index, step)| {
            let visible = is_revealed(stepper, index);
            let hovered = interaction.hovered_output == Some(index);
            let pinned = interaction.clicked_output == Some(index);
            let active = hovered || pinned || demo_step == Some(index);
            let dimmed = visible && !active;
            let opacity = match (visible, active) {
                (false, _) => 0.0,
                (true, true) => 1.0,
                (true, false) => config.dim_opacity,
            };
            OutputTokenStyle {
                index,
                token: step.output_token.clone(),
                visible,
                active,
                dimmed,
                hovered,
                pinned,
                opacity,
            }
        })
        .collect()
}

/// One entry of the tooltip context list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextEntry {
    /// Input token index
    pub index: usize,
    pub token: String,
    pub weight: f64,
}

/// Top input tokens by weight for a step.
///
/// Keeps weights above `context_threshold`, sorts descending with ties in
/// input order, and returns at most `context_top_k` entries.
pub fn top_context(tokens: &[String], weights: &[f64], config: &VizConfig) -> Vec<ContextEntry> {
    let mut entries: Vec<ContextEntry> = weights
        .iter()
        .enumerate()
        .filter(|(_, &w)| w > config.context_threshold)
        .map(|(index, &weight)| ContextEntry {
            index,
            token: tokens.get(index).cloned().unwrap_or_default(),
            weight,
        })
        .collect();
    // sort_by is stable, so equal weights keep input order
    entries.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    entries.truncate(config.context_top_k);
    entries
}

/// Round a weight to a whole percentage
pub fn percent(weight: f64) -> i64 {
    (weight * 100.0).round() as i64
}

/// What a tooltip is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum TooltipAnchor {
    Input(usize),
    Output(usize),
}

/// Tooltip payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub anchor: TooltipAnchor,
    pub title: Option<String>,
    pub lines: Vec<String>,
}

/// Weight tooltip for a hovered input token, shown only while a step is active
pub fn input_tooltip(
    hovered_input: Option<usize>,
    active_step: Option<usize>,
    weights: &[f64],
) -> Option<Tooltip> {
    let idx = hovered_input?;
    active_step?;
    let weight = weights.get(idx).copied().unwrap_or(0.0);
    Some(Tooltip {
        anchor: TooltipAnchor::Input(idx),
        title: None,
        lines: vec![format!("Attention Weight: {}%", percent(weight))],
    })
}

/// Context tooltip for a hovered, revealed output token.
///
/// Returns `None` when the step has no context above the threshold.
pub fn output_tooltip(
    example: &Example,
    stepper: &StepperState,
    hovered_output: Option<usize>,
    config: &VizConfig,
) -> Option<Tooltip> {
    let idx = hovered_output?;
    if !is_revealed(stepper, idx) {
        return None;
    }
    let context = top_context(&example.input_tokens, example.weights(idx)?, config);
    if context.is_empty() {
        return None;
    }
    Some(Tooltip {
        anchor: TooltipAnchor::Output(idx),
        title: Some("Model Context".to_string()),
        lines: context
            .iter()
            .map(|c| format!("\"{}\" {}%", c.token.replace(['.', ','], ""), percent(c.weight)))
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::ExampleBuilder;
    use std::sync::Arc;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| (*w).to_string()).collect()
    }

    fn example() -> Arc<Example> {
        let (example, _) = ExampleBuilder::new("x", "X", tokens(&["bat.", "live", "panic,", "a"]))
            .dense_step("o0", vec![0.1, 0.5, 0.3, 0.1])
            .dense_step("o1", vec![0.0, 0.0, 0.0, 1.0])
            .dense_step("o2", vec![0.25, 0.25, 0.25, 0.25])
            .dense_step("o3", vec![0.7, 0.1, 0.1, 0.1])
            .dense_step("o4", vec![0.1, 0.1, 0.1, 0.7])
            .build();
        Arc::new(example)
    }

    #[test]
    fn test_top_context_order() {
        let config = VizConfig::default();
        let words = tokens(&["a", "b", "c", "d"]);
        let ctx = top_context(&words, &[0.1, 0.5, 0.3, 0.01], &config);
        let order: Vec<usize> = ctx.iter().map(|c| c.index).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn test_top_context_ties_keep_input_order() {
        let config = VizConfig::default();
        let words = tokens(&["a", "b", "c", "d"]);
        let ctx = top_context(&words, &[0.25, 0.25, 0.25, 0.25], &config);
        let order: Vec<usize> = ctx.iter().map(|c| c.index).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn test_connector_threshold_is_strict() {
        let config = VizConfig::default();
        assert!(!connector_visible(0.01, &config));
        assert!(!connector_visible(0.02, &config));
        assert!(connector_visible(0.021, &config));
    }

    #[test]
    fn test_input_style_thresholds() {
        let config = VizConfig::default();
        let words = tokens(&["a", "b", "c", "d"]);
        let styles = input_styles(&words, &[0.1, 0.35, 0.45, 0.6], Some(0), &config);

        assert!(styles[0].hovered && styles[0].scaled && styles[0].shadowed);
        assert!(!styles[0].strong && !styles[0].notable);

        assert!(styles[1].notable && styles[1].shadowed && !styles[1].light_text);
        assert!(styles[1].borderless);

        assert!(styles[2].light_text && !styles[2].scaled);

        assert!(styles[3].strong && styles[3].scaled && styles[3].light_text);
        assert!((styles[3].fill_intensity - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_no_active_step_is_all_zero() {
        let ex = example();
        assert_eq!(visible_weights(&ex, None), vec![0.0; 4]);
        assert_eq!(visible_weights(&ex, Some(99)), vec![0.0; 4]);
        assert!((visible_weights(&ex, Some(1))[3] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_demo_reveal_and_active() {
        let config = VizConfig::default();
        let mut stepper = StepperState::new();
        stepper.select_example(example());
        stepper.start_demo();
        stepper.advance_step();
        stepper.advance_step();
        stepper.advance_step();

        let styles = output_styles(
            stepper.selected_example().unwrap(),
            &stepper,
            &InteractionState::default(),
            &config,
        );
        let visible: Vec<bool> = styles.iter().map(|s| s.visible).collect();
        assert_eq!(visible, vec![true, true, true, true, false]);
        let active: Vec<usize> = styles.iter().filter(|s| s.active).map(|s| s.index).collect();
        assert_eq!(active, vec![3]);
        assert!(styles[0].dimmed && !styles[3].dimmed && !styles[4].dimmed);
        assert_eq!(styles[4].opacity, 0.0);
        assert!((styles[0].opacity - config.dim_opacity).abs() < 1e-12);
    }

    #[test]
    fn test_active_pills_compose() {
        let config = VizConfig::default();
        let mut stepper = StepperState::new();
        stepper.select_example(example());
        stepper.start_demo();
        stepper.advance_step();
        stepper.advance_step();
        let interaction = InteractionState {
            hovered_input: None,
            hovered_output: Some(1),
            clicked_output: Some(0),
        };
        let styles = output_styles(stepper.selected_example().unwrap(), &stepper, &interaction, &config);
        let active: Vec<usize> = styles.iter().filter(|s| s.active).map(|s| s.index).collect();
        assert_eq!(active, vec![0, 1, 2]);
    }

    #[test]
    fn test_exploration_reveals_everything() {
        let config = VizConfig::default();
        let mut stepper = StepperState::new();
        stepper.select_example(example());
        let styles = output_styles(
            stepper.selected_example().unwrap(),
            &stepper,
            &InteractionState::default(),
            &config,
        );
        assert!(styles.iter().all(|s| s.visible && s.dimmed && !s.active));
    }

    #[test]
    fn test_input_tooltip_requires_active_step() {
        assert!(input_tooltip(Some(1), None, &[0.0, 0.0]).is_none());
        let tip = input_tooltip(Some(1), Some(0), &[0.55, 0.45]).unwrap();
        assert_eq!(tip.anchor, TooltipAnchor::Input(1));
        assert_eq!(tip.lines, vec!["Attention Weight: 45%".to_string()]);
    }

    #[test]
    fn test_output_tooltip_strips_punctuation() {
        let config = VizConfig::default();
        let mut stepper = StepperState::new();
        stepper.select_example(example());
        let ex = stepper.selected_example().unwrap().clone();
        let tip = output_tooltip(&ex, &stepper, Some(0), &config).unwrap();
        assert_eq!(tip.title.as_deref(), Some("Model Context"));
        assert_eq!(
            tip.lines,
            vec![
                "\"live\" 50%".to_string(),
                "\"panic\" 30%".to_string(),
                "\"bat\" 10%".to_string()
            ]
        );
    }

    #[test]
    fn test_output_tooltip_hidden_when_unrevealed() {
        let config = VizConfig::default();
        let mut stepper = StepperState::new();
        stepper.select_example(example());
        stepper.start_demo();
        let ex = stepper.selected_example().unwrap().clone();
        assert!(output_tooltip(&ex, &stepper, Some(2), &config).is_none());
        assert!(output_tooltip(&ex, &stepper, Some(0), &config).is_some());
    }
}
