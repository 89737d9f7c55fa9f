//! Pointer interaction state and active-step resolution

use serde::Serialize;

use crate::stepper::StepperState;

/// Hover and click state owned by the engine
///
/// Cleared whenever the selected example or the demo-running flag changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InteractionState {
    /// Input token under the pointer (cosmetic only)
    pub hovered_input: Option<usize>,
    /// Output token under the pointer
    pub hovered_output: Option<usize>,
    /// Output token pinned by a click
    pub clicked_output: Option<usize>,
}

impl InteractionState {
    /// Reset to empty
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn hover_input(&mut self, idx: usize) {
        self.hovered_input = Some(idx);
    }

    pub fn leave_input(&mut self) {
        self.hovered_input = None;
    }

    /// Hover an output token; ignored unless the token is revealed
    pub fn hover_output(&mut self, idx: usize, revealed: bool) -> bool {
        if !revealed {
            return false;
        }
        self.hovered_output = Some(idx);
        true
    }

    pub fn leave_output(&mut self) {
        self.hovered_output = None;
    }

    /// Toggle the pin on an output token; ignored unless the token is revealed
    pub fn click_output(&mut self, idx: usize, revealed: bool) -> bool {
        if !revealed {
            return false;
        }
        self.clicked_output = if self.clicked_output == Some(idx) {
            None
        } else {
            Some(idx)
        };
        true
    }
}

/// Resolve the single step driving the visualization.
///
/// First match wins: hovered output, then pinned output, then the running
/// demo's current step. Candidates past the example's last step are skipped,
/// so an out-of-range hover falls through to the pin. Always `None` without a
/// selected example.
pub fn resolve_active_step(interaction: &InteractionState, stepper: &StepperState) -> Option<usize> {
    let example = stepper.selected_example()?;
    let demo_step = if stepper.is_translating() {
        stepper.current_step()
    } else {
        None
    };
    let in_range = |idx: &usize| *idx < example.n_steps();
    interaction
        .hovered_output
        .filter(in_range)
        .or_else(|| interaction.clicked_output.filter(in_range))
        .or_else(|| demo_step.filter(in_range))
}
