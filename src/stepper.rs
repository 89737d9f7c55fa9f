//! Selection and step-through demo controller
//!
//! Holds which example is selected, the demo's current step and whether the
//! demo is running. The rendering engine only reads this state.

use std::sync::Arc;
use tracing::debug;

use crate::dataset::Example;

/// Controller state: selection, current step, running flag
///
/// Invariant: `current_step` is `None` or a valid index into the selected
/// example's output steps. While translating it only moves forward, one step
/// at a time.
#[derive(Debug, Clone, Default)]
pub struct StepperState {
    selected: Option<Arc<Example>>,
    current_step: Option<usize>,
    translating: bool,
}

impl StepperState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select an example, or deselect it if it is already selected.
    ///
    /// Either way the step index is cleared and the demo stops.
    pub fn select_example(&mut self, example: Arc<Example>) {
        let same = self
            .selected
            .as_ref()
            .is_some_and(|current| current.id == example.id);
        self.current_step = None;
        self.translating = false;
        if same {
            debug!("Deselected example '{}'", example.id);
            self.selected = None;
        } else {
            debug!("Selected example '{}'", example.id);
            self.selected = Some(example);
        }
    }

    /// Start the demo at the first step.
    ///
    /// No-op without a selected example that has at least one step.
    pub fn start_demo(&mut self) {
        if self.last_index().is_none() {
            debug!("start_demo ignored: nothing to step through");
            return;
        }
        self.translating = true;
        self.current_step = Some(0);
    }

    /// Advance the demo by one step; returns whether the index moved
    pub fn advance_step(&mut self) -> bool {
        if !self.can_step_forward() {
            return false;
        }
        self.current_step = Some(self.current_step.map_or(0, |step| step + 1));
        true
    }

    /// Stop the demo and clear the step index
    pub fn reset(&mut self) {
        self.translating = false;
        self.current_step = None;
    }

    /// Whether the running demo has reached the last step
    pub fn is_finished(&self) -> bool {
        self.translating && self.current_step.is_some() && self.current_step == self.last_index()
    }

    /// Whether `advance_step` would move the index
    pub fn can_step_forward(&self) -> bool {
        match (self.translating, self.current_step, self.last_index()) {
            (true, Some(step), Some(last)) => step < last,
            _ => false,
        }
    }

    /// The selected example
    pub fn selected_example(&self) -> Option<&Arc<Example>> {
        self.selected.as_ref()
    }

    /// The demo's current step (`None` before the demo starts)
    pub fn current_step(&self) -> Option<usize> {
        self.current_step
    }

    /// Whether the demo is running
    pub fn is_translating(&self) -> bool {
        self.translating
    }

    fn last_index(&self) -> Option<usize> {
        self.selected.as_ref().and_then(|e| e.last_step_index())
    }
}
