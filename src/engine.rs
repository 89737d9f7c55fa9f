//! Attention rendering engine
//!
//! Owns the interaction state, the current anchor geometry and the pending
//! reconcile pass. The controller's [`StepperState`] is read, never written.
//!
//! ## Update protocol
//!
//! After every event (controller transition, pointer gesture, layout change)
//! the caller lays out the latest [`Scene`] and calls [`AttentionEngine::observe`]
//! with a [`LayoutOracle`] over that layout:
//!
//! 1. If the selected example or the running flag changed, interaction state
//!    is cleared and any pending reconcile pass is cancelled.
//! 2. If the (example, active step) pair changed, geometry is sampled
//!    immediately and a follow-up pass is scheduled `reconcile_delay_ms` later.
//!
//! [`AttentionEngine::tick`] runs the follow-up pass once it is due;
//! [`AttentionEngine::resize`] resamples immediately.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::VizConfig;
use crate::dataset::{Dataset, Example};
use crate::encoding::{
    input_styles, input_tooltip, is_revealed, output_styles, output_tooltip, visible_weights,
};
use crate::geometry::{build_curves, compute_anchors, AnchorGeometry, LayoutOracle};
use crate::interaction::{resolve_active_step, InteractionState};
use crate::reconcile::{ReconcileTimer, TaskHandle};
use crate::scene::{
    Mode, Scene, DEMO_LABEL, EXPLORATION_LABEL, EXPLORE_HINT, INPUT_LABEL, SELECT_PROMPT,
};
use crate::stepper::StepperState;

/// Controller facts that invalidate interaction state when they change
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct ModeKey {
    example_id: Option<String>,
    translating: bool,
}

/// What the current geometry was sampled for
#[derive(Debug, Clone, PartialEq, Eq)]
struct GeometryKey {
    example_id: String,
    step: usize,
}

/// The interactive core: active-step resolution, encodings and geometry
#[derive(Debug)]
pub struct AttentionEngine {
    dataset: Arc<Dataset>,
    config: VizConfig,
    interaction: InteractionState,
    geometry: Option<AnchorGeometry>,
    timer: ReconcileTimer,
    mode_key: ModeKey,
    geometry_key: Option<GeometryKey>,
    passes: u64,
}

impl AttentionEngine {
    pub fn new(dataset: Arc<Dataset>, config: VizConfig) -> Self {
        Self {
            dataset,
            config,
            interaction: InteractionState::default(),
            geometry: None,
            timer: ReconcileTimer::new(),
            mode_key: ModeKey::default(),
            geometry_key: None,
            passes: 0,
        }
    }

    pub fn config(&self) -> &VizConfig {
        &self.config
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    /// Anchors from the latest geometry pass
    pub fn geometry(&self) -> Option<&AnchorGeometry> {
        self.geometry.as_ref()
    }

    /// Handle of the scheduled follow-up pass, if any
    pub fn pending_reconcile(&self) -> Option<TaskHandle> {
        self.timer.pending()
    }

    /// When the scheduled follow-up pass is due
    pub fn reconcile_due_at(&self) -> Option<Duration> {
        self.timer.due_at()
    }

    /// Number of geometry passes run so far
    pub fn geometry_passes(&self) -> u64 {
        self.passes
    }

    /// Resolve the active step against the controller state
    pub fn active_step(&self, stepper: &StepperState) -> Option<usize> {
        resolve_active_step(&self.interaction, stepper)
    }

    // --- Pointer gestures ---
    //
    // Gestures only touch interaction state; follow each with `observe`.

    pub fn hover_input(&mut self, idx: usize) {
        self.interaction.hover_input(idx);
    }

    pub fn leave_input(&mut self) {
        self.interaction.leave_input();
    }

    /// Hover an output token; ignored unless it is revealed
    pub fn hover_output(&mut self, stepper: &StepperState, idx: usize) -> bool {
        self.interaction.hover_output(idx, Self::revealed(stepper, idx))
    }

    pub fn leave_output(&mut self) {
        self.interaction.leave_output();
    }

    /// Toggle the pin on an output token; ignored unless it is revealed
    pub fn click_output(&mut self, stepper: &StepperState, idx: usize) -> bool {
        self.interaction.click_output(idx, Self::revealed(stepper, idx))
    }

    fn revealed(stepper: &StepperState, idx: usize) -> bool {
        stepper
            .selected_example()
            .is_some_and(|e| idx < e.n_steps() && is_revealed(stepper, idx))
    }

    // --- State observation and geometry ---

    /// Bring the engine up to date with the controller state and layout
    pub fn observe(&mut self, stepper: &StepperState, now: Duration, oracle: &dyn LayoutOracle) {
        let mode_key = ModeKey {
            example_id: stepper.selected_example().map(|e| e.id.clone()),
            translating: stepper.is_translating(),
        };
        if mode_key != self.mode_key {
            info!(
                "Mode change: example={:?} translating={}; clearing interaction",
                mode_key.example_id, mode_key.translating
            );
            self.interaction.clear();
            self.timer.cancel();
            self.mode_key = mode_key;
        }

        let key = self.current_key(stepper);
        if key != self.geometry_key {
            self.sample(stepper, oracle);
            self.geometry_key = key;
            if self.geometry_key.is_some() {
                self.timer.schedule(now, self.config.reconcile_delay());
            } else {
                self.timer.cancel();
            }
        }
    }

    /// Run the follow-up pass if it is due; returns whether it ran
    pub fn tick(&mut self, stepper: &StepperState, now: Duration, oracle: &dyn LayoutOracle) -> bool {
        match self.timer.fire_due(now) {
            Some(handle) => {
                debug!("Reconcile {:?} running", handle);
                self.sample(stepper, oracle);
                true
            }
            None => false,
        }
    }

    /// Resample geometry after the viewport changed size
    pub fn resize(&mut self, stepper: &StepperState, oracle: &dyn LayoutOracle) {
        self.sample(stepper, oracle);
    }

    fn current_key(&self, stepper: &StepperState) -> Option<GeometryKey> {
        let example = stepper.selected_example()?;
        let step = self.active_step(stepper)?;
        Some(GeometryKey {
            example_id: example.id.clone(),
            step,
        })
    }

    fn sample(&mut self, stepper: &StepperState, oracle: &dyn LayoutOracle) {
        let active = self.active_step(stepper);
        let n_inputs = stepper.selected_example().map_or(0, |e| e.n_inputs());
        self.geometry = compute_anchors(oracle, active, n_inputs);
        self.passes += 1;
        debug!(
            "Geometry pass {}: step={:?} anchors={}",
            self.passes,
            active,
            self.geometry.as_ref().map_or(0, |g| g.destinations.len())
        );
    }

    // --- Scene ---

    /// Input tokens shown before any example is selected
    fn idle_inputs(&self) -> &[String] {
        self.dataset
            .examples()
            .first()
            .map(|e| e.input_tokens.as_slice())
            .unwrap_or_default()
    }

    /// Build the scene for the current state
    pub fn scene(&self, stepper: &StepperState) -> Scene {
        let mode = if stepper.is_translating() {
            Mode::Demo
        } else {
            Mode::Exploration
        };
        let active_step = self.active_step(stepper);

        let Some(example) = stepper.selected_example() else {
            let inputs = input_styles(
                self.idle_inputs(),
                &[],
                self.interaction.hovered_input,
                &self.config,
            );
            return Scene {
                example_id: None,
                mode,
                active_step: None,
                input_label: INPUT_LABEL.to_string(),
                output_label: None,
                placeholder: Some(SELECT_PROMPT.to_string()),
                inputs,
                outputs: Vec::new(),
                curves: Vec::new(),
                tooltips: Vec::new(),
            };
        };

        let weights = visible_weights(example, active_step);
        let inputs = input_styles(
            &example.input_tokens,
            &weights,
            self.interaction.hovered_input,
            &self.config,
        );
        let outputs = output_styles(example, stepper, &self.interaction, &self.config);

        let curves = match (&self.geometry, active_step) {
            (Some(geometry), Some(step)) if geometry.step == step => {
                build_curves(geometry, &weights, &self.config)
            }
            _ => Vec::new(),
        };

        let tooltips = input_tooltip(self.interaction.hovered_input, active_step, &weights)
            .into_iter()
            .chain(output_tooltip(
                example,
                stepper,
                self.interaction.hovered_output,
                &self.config,
            ))
            .collect();

        let placeholder = (mode == Mode::Exploration && active_step.is_none())
            .then(|| EXPLORE_HINT.to_string());
        let output_label = match mode {
            Mode::Demo => DEMO_LABEL,
            Mode::Exploration => EXPLORATION_LABEL,
        };

        Scene {
            example_id: Some(example.id.clone()),
            mode,
            active_step,
            input_label: INPUT_LABEL.to_string(),
            output_label: Some(output_label.to_string()),
            placeholder,
            inputs,
            outputs,
            curves,
            tooltips,
        }
    }

    /// Look up an example in the dataset
    pub fn example(&self, id: &str) -> Option<Arc<Example>> {
        self.dataset.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::ExampleBuilder;
    use crate::geometry::{Point, Rect};
    use std::cell::Cell;

    /// Every token is a 50x20 box: inputs on row y=0, outputs on row y=200
    struct GridOracle;

    impl LayoutOracle for GridOracle {
        fn container(&self) -> Option<Rect> {
            Some(Rect::new(0.0, 0.0, 1000.0, 400.0))
        }

        fn measure_input(&self, idx: usize) -> Option<Rect> {
            Some(Rect::new(idx as f64 * 60.0, 0.0, 50.0, 20.0))
        }

        fn measure_output(&self, idx: usize) -> Option<Rect> {
            Some(Rect::new(idx as f64 * 60.0, 200.0, 50.0, 20.0))
        }
    }

    /// Inputs sit `shift` px down; input 1 is laid out only once `mounted`
    struct MovingOracle {
        shift: Cell<f64>,
        mounted: Cell<bool>,
    }

    impl LayoutOracle for MovingOracle {
        fn container(&self) -> Option<Rect> {
            Some(Rect::new(0.0, 0.0, 1000.0, 400.0))
        }

        fn measure_input(&self, idx: usize) -> Option<Rect> {
            if idx == 1 && !self.mounted.get() {
                return None;
            }
            Some(Rect::new(idx as f64 * 60.0, self.shift.get(), 50.0, 20.0))
        }

        fn measure_output(&self, idx: usize) -> Option<Rect> {
            Some(Rect::new(idx as f64 * 60.0, 200.0, 50.0, 20.0))
        }
    }

    fn dataset() -> Arc<Dataset> {
        let tokens: Vec<String> = ["a", "b", "c"].iter().map(|s| (*s).to_string()).collect();
        let x = ExampleBuilder::new("x", "X", tokens.clone())
            .dense_step("x0", vec![0.01, 0.5, 0.49])
            .dense_step("x1", vec![1.0, 0.0, 0.0])
            .dense_step("x2", vec![0.0, 0.0, 1.0]);
        let y = ExampleBuilder::new("y", "Y", tokens).dense_step("y0", vec![0.2, 0.3, 0.5]);
        Arc::new(Dataset::from_builders(vec![x, y]))
    }

    fn setup() -> (AttentionEngine, StepperState) {
        let dataset = dataset();
        let engine = AttentionEngine::new(dataset, VizConfig::default());
        (engine, StepperState::new())
    }

    #[test]
    fn test_idle_scene() {
        let (mut engine, stepper) = setup();
        engine.observe(&stepper, Duration::ZERO, &GridOracle);
        let scene = engine.scene(&stepper);
        assert!(!scene.has_example());
        assert_eq!(scene.inputs.len(), 3);
        assert!(scene.outputs.is_empty());
        assert!(scene.curves.is_empty());
        assert_eq!(scene.placeholder.as_deref(), Some(SELECT_PROMPT));
        assert!(engine.pending_reconcile().is_none());
    }

    #[test]
    fn test_click_draws_filtered_curves() {
        let (mut engine, mut stepper) = setup();
        stepper.select_example(engine.example("x").unwrap());
        engine.observe(&stepper, Duration::ZERO, &GridOracle);

        assert!(engine.click_output(&stepper, 0));
        engine.observe(&stepper, Duration::ZERO, &GridOracle);
        let scene = engine.scene(&stepper);
        assert_eq!(scene.active_step, Some(0));
        let inputs: Vec<usize> = scene.curves.iter().map(|c| c.input).collect();
        assert_eq!(inputs, vec![1, 2]);
        assert!(scene.placeholder.is_none());
        assert!(engine.pending_reconcile().is_some());
    }

    #[test]
    fn test_geometry_sampled_now_and_after_delay() {
        let (mut engine, mut stepper) = setup();
        stepper.select_example(engine.example("x").unwrap());
        engine.observe(&stepper, Duration::ZERO, &GridOracle);
        stepper.start_demo();
        engine.observe(&stepper, Duration::from_millis(10), &GridOracle);
        let after_change = engine.geometry_passes();

        assert_eq!(engine.reconcile_due_at(), Some(Duration::from_millis(110)));
        assert!(!engine.tick(&stepper, Duration::from_millis(109), &GridOracle));
        assert!(engine.tick(&stepper, Duration::from_millis(110), &GridOracle));
        assert_eq!(engine.geometry_passes(), after_change + 1);
        assert!(engine.pending_reconcile().is_none());
    }

    #[test]
    fn test_delayed_pass_picks_up_moved_layout() {
        let (mut engine, mut stepper) = setup();
        let oracle = MovingOracle {
            shift: Cell::new(0.0),
            mounted: Cell::new(true),
        };
        stepper.select_example(engine.example("x").unwrap());
        engine.observe(&stepper, Duration::ZERO, &oracle);
        engine.click_output(&stepper, 0);
        engine.observe(&stepper, Duration::ZERO, &oracle);
        assert_eq!(engine.geometry().unwrap().destinations[0], Point::new(25.0, 20.0));

        oracle.shift.set(40.0);
        assert!(!engine.tick(&stepper, Duration::from_millis(99), &oracle));
        assert_eq!(engine.geometry().unwrap().destinations[0], Point::new(25.0, 20.0));

        assert!(engine.tick(&stepper, Duration::from_millis(100), &oracle));
        let destinations = &engine.geometry().unwrap().destinations;
        assert_eq!(destinations[0], Point::new(25.0, 60.0));
        assert_eq!(destinations[2], Point::new(145.0, 60.0));
        let scene = engine.scene(&stepper);
        assert!(scene.curves.iter().all(|c| (c.dest.y - 60.0).abs() < 1e-9));
    }

    #[test]
    fn test_delayed_pass_heals_missing_anchor() {
        let (mut engine, mut stepper) = setup();
        let oracle = MovingOracle {
            shift: Cell::new(0.0),
            mounted: Cell::new(false),
        };
        stepper.select_example(engine.example("x").unwrap());
        stepper.start_demo();
        engine.observe(&stepper, Duration::ZERO, &oracle);
        assert_eq!(engine.geometry().unwrap().destinations[1], Point::default());

        oracle.mounted.set(true);
        assert!(engine.tick(&stepper, Duration::from_millis(100), &oracle));
        assert_eq!(engine.geometry().unwrap().destinations[1], Point::new(85.0, 20.0));
        let curve = engine
            .scene(&stepper)
            .curves
            .into_iter()
            .find(|c| c.input == 1)
            .unwrap();
        assert_eq!(curve.dest, Point::new(85.0, 20.0));
    }

    #[test]
    fn test_unchanged_state_does_not_resample() {
        let (mut engine, mut stepper) = setup();
        stepper.select_example(engine.example("x").unwrap());
        stepper.start_demo();
        engine.observe(&stepper, Duration::ZERO, &GridOracle);
        let passes = engine.geometry_passes();
        engine.observe(&stepper, Duration::from_millis(5), &GridOracle);
        assert_eq!(engine.geometry_passes(), passes);
    }

    #[test]
    fn test_switching_example_clears_pin_and_cancels_reconcile() {
        let (mut engine, mut stepper) = setup();
        stepper.select_example(engine.example("x").unwrap());
        engine.observe(&stepper, Duration::ZERO, &GridOracle);
        engine.click_output(&stepper, 2);
        engine.observe(&stepper, Duration::ZERO, &GridOracle);
        assert!(engine.pending_reconcile().is_some());

        stepper.select_example(engine.example("y").unwrap());
        engine.observe(&stepper, Duration::from_millis(20), &GridOracle);
        assert_eq!(engine.interaction().clicked_output, None);
        assert!(engine.pending_reconcile().is_none());
        assert!(engine.geometry().is_none());
        assert_eq!(engine.scene(&stepper).active_step, None);
    }

    #[test]
    fn test_toggling_demo_clears_interaction() {
        let (mut engine, mut stepper) = setup();
        stepper.select_example(engine.example("x").unwrap());
        engine.observe(&stepper, Duration::ZERO, &GridOracle);
        engine.click_output(&stepper, 1);
        engine.hover_input(0);
        engine.observe(&stepper, Duration::ZERO, &GridOracle);

        stepper.start_demo();
        engine.observe(&stepper, Duration::ZERO, &GridOracle);
        assert_eq!(*engine.interaction(), InteractionState::default());
        assert_eq!(engine.active_step(&stepper), Some(0));
    }

    #[test]
    fn test_hover_peeks_over_pin() {
        let (mut engine, mut stepper) = setup();
        stepper.select_example(engine.example("x").unwrap());
        engine.observe(&stepper, Duration::ZERO, &GridOracle);
        engine.click_output(&stepper, 1);
        engine.hover_output(&stepper, 2);
        engine.observe(&stepper, Duration::ZERO, &GridOracle);
        assert_eq!(engine.geometry().unwrap().step, 2);

        engine.leave_output();
        engine.observe(&stepper, Duration::from_millis(30), &GridOracle);
        assert_eq!(engine.geometry().unwrap().step, 1);
        assert_eq!(engine.reconcile_due_at(), Some(Duration::from_millis(130)));
    }

    #[test]
    fn test_unrevealed_output_ignores_gestures() {
        let (mut engine, mut stepper) = setup();
        stepper.select_example(engine.example("x").unwrap());
        stepper.start_demo();
        engine.observe(&stepper, Duration::ZERO, &GridOracle);
        assert!(!engine.hover_output(&stepper, 2));
        assert!(!engine.click_output(&stepper, 2));
        assert!(engine.hover_output(&stepper, 0));
    }

    #[test]
    fn test_tooltips() {
        let (mut engine, mut stepper) = setup();
        stepper.select_example(engine.example("x").unwrap());
        engine.observe(&stepper, Duration::ZERO, &GridOracle);

        engine.hover_input(1);
        assert!(engine.scene(&stepper).tooltips.is_empty());

        engine.hover_output(&stepper, 0);
        engine.observe(&stepper, Duration::ZERO, &GridOracle);
        let scene = engine.scene(&stepper);
        assert_eq!(scene.tooltips.len(), 2);
        assert_eq!(scene.tooltips[0].lines, vec!["Attention Weight: 50%".to_string()]);
        assert_eq!(scene.tooltips[1].lines.len(), 2);
    }
}
