//! Presentation shell
//!
//! Wires the stepper controller and the attention engine together the way the
//! page does: header copy, scenario buttons, demo controls and the
//! visualization panel. Events arrive as [`Command`]s, either one at a time or
//! as a script:
//!
//! ```text
//! select attention-context; start; next; next; hover-output 1; wait 100
//! ```
//!
//! Time is virtual. `wait <ms>` advances the clock and runs any reconcile pass
//! that has come due.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::{LayoutConfig, VizConfig};
use crate::dataset::Dataset;
use crate::engine::AttentionEngine;
use crate::layout::FlowLayout;
use crate::render::{render_svg, render_text};
use crate::scene::Scene;
use crate::stepper::StepperState;

pub const TITLE: &str = "Understanding Attention";
pub const INTRO: &str = "Modern language models don't just process words in a line. \
The attention mechanism allows them to dynamically \"look back\" at the most relevant \
parts of a sentence when generating each new word.";

pub const EXPLAINER_TITLE: &str = "The Bat Mystery: Local vs. Global Context";
pub const EXPLAINER_QUOTE: &str =
    "\"I noticed a man holding a bat... it was a live bat... panic break out.\"";
pub const EXPLAINER_LOCAL: &str = "1. Sequential Failure (Local Focus): A standard model \
translates \"bat\" as مضرب (Sports Bat) initially because it doesn't \"look ahead\". By the \
time it sees \"live\" and \"panic\" at the end, the early sentences are already translated \
inconsistently, creating a confusing story.";
pub const EXPLAINER_GLOBAL: &str = "2. Attention Success (Global Gaze): The Attention \
mechanism allows the model to look at the words \"live\" and \"panic\" even while \
translating the very first sentence. It understands the \"bat\" is an animal (خفاش) \
immediately, ensuring global coherence across the entire text.";

pub const START_LABEL: &str = "Start Translation";
pub const NEXT_LABEL: &str = "Generate Next Word";
pub const COMPLETE_LABEL: &str = "Complete";
pub const RESET_LABEL: &str = "Reset";

/// One user event
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Toggle selection of a scenario by id
    Select(String),
    Start,
    Next,
    Reset,
    HoverInput(usize),
    LeaveInput,
    HoverOutput(usize),
    LeaveOutput,
    ClickOutput(usize),
    /// Change the viewport width (px)
    Resize(f64),
    /// Advance the virtual clock (ms)
    Wait(u64),
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split_whitespace();
        let Some(verb) = parts.next() else {
            bail!("Empty command");
        };
        let arg = parts.next();
        if let Some(extra) = parts.next() {
            bail!("Unexpected argument '{extra}' in '{s}'");
        }

        let index = |name: &str| -> Result<usize> {
            let raw = arg.with_context(|| format!("'{name}' needs a token index"))?;
            raw.parse()
                .with_context(|| format!("Invalid token index '{raw}' for '{name}'"))
        };
        let no_arg = |cmd: Command| -> Result<Command> {
            match arg {
                Some(a) => bail!("'{verb}' takes no argument, got '{a}'"),
                None => Ok(cmd),
            }
        };

        match verb {
            "select" => Ok(Command::Select(
                arg.context("'select' needs an example id")?.to_string(),
            )),
            "start" => no_arg(Command::Start),
            "next" => no_arg(Command::Next),
            "reset" => no_arg(Command::Reset),
            "hover-input" => Ok(Command::HoverInput(index(verb)?)),
            "leave-input" => no_arg(Command::LeaveInput),
            "hover-output" => Ok(Command::HoverOutput(index(verb)?)),
            "leave-output" => no_arg(Command::LeaveOutput),
            "click-output" => Ok(Command::ClickOutput(index(verb)?)),
            "resize" => {
                let raw = arg.context("'resize' needs a width in px")?;
                let width: f64 = raw
                    .parse()
                    .with_context(|| format!("Invalid width '{raw}'"))?;
                anyhow::ensure!(width > 0.0, "Width must be positive, got {width}");
                Ok(Command::Resize(width))
            }
            "wait" => {
                let raw = arg.context("'wait' needs a duration in ms")?;
                Ok(Command::Wait(
                    raw.parse()
                        .with_context(|| format!("Invalid duration '{raw}'"))?,
                ))
            }
            other => bail!("Unknown command '{other}'"),
        }
    }
}

/// Parse a script of `;`- or newline-separated commands.
///
/// Blank entries and `#` comments are skipped.
pub fn parse_script(script: &str) -> Result<Vec<Command>> {
    script
        .split(['\n', ';'])
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.parse().with_context(|| format!("Bad script entry '{line}'")))
        .collect()
}

/// A scenario selector button
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioButton {
    pub id: String,
    pub label: String,
    pub selected: bool,
    pub enabled: bool,
}

/// A demo control button
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlButton {
    pub label: &'static str,
    pub enabled: bool,
}

/// A full interactive session over one dataset
#[derive(Debug)]
pub struct Shell {
    stepper: StepperState,
    engine: AttentionEngine,
    layout_config: LayoutConfig,
    clock: Duration,
}

impl Shell {
    pub fn new(dataset: Arc<Dataset>, config: VizConfig) -> Self {
        let layout_config = config.layout.clone();
        let mut shell = Self {
            stepper: StepperState::new(),
            engine: AttentionEngine::new(dataset, config),
            layout_config,
            clock: Duration::ZERO,
        };
        shell.observe();
        shell
    }

    pub fn stepper(&self) -> &StepperState {
        &self.stepper
    }

    pub fn engine(&self) -> &AttentionEngine {
        &self.engine
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.clock
    }

    /// Apply one event and bring the engine up to date.
    ///
    /// Gestures the page would not deliver (a disabled button, a control that
    /// is not shown) are logged and ignored. Unknown example ids are errors.
    pub fn apply(&mut self, command: &Command) -> Result<()> {
        debug!("t={}ms {:?}", self.clock.as_millis(), command);
        match command {
            Command::Select(id) => {
                if self.stepper.is_translating() {
                    warn!("Scenario buttons are disabled while the demo runs; ignoring '{id}'");
                    return Ok(());
                }
                let example = self
                    .engine
                    .example(id)
                    .with_context(|| format!("Unknown example '{id}'"))?;
                self.stepper.select_example(example);
            }
            Command::Start => {
                if !self.controls_shown() || self.stepper.is_translating() {
                    warn!("'{START_LABEL}' is not shown; ignoring");
                    return Ok(());
                }
                self.stepper.start_demo();
            }
            Command::Next => {
                if !self.stepper.advance_step() {
                    warn!("'{NEXT_LABEL}' is disabled; ignoring");
                    return Ok(());
                }
            }
            Command::Reset => {
                if !self.controls_shown() || !self.stepper.is_translating() {
                    warn!("'{RESET_LABEL}' is not shown; ignoring");
                    return Ok(());
                }
                self.stepper.reset();
            }
            Command::HoverInput(idx) => self.engine.hover_input(*idx),
            Command::LeaveInput => self.engine.leave_input(),
            Command::HoverOutput(idx) => {
                if !self.engine.hover_output(&self.stepper, *idx) {
                    debug!("Output token {idx} is not revealed; hover ignored");
                }
            }
            Command::LeaveOutput => self.engine.leave_output(),
            Command::ClickOutput(idx) => {
                if !self.engine.click_output(&self.stepper, *idx) {
                    debug!("Output token {idx} is not revealed; click ignored");
                }
            }
            Command::Resize(width) => {
                self.layout_config.viewport_width = *width;
                let layout = self.layout();
                self.engine.resize(&self.stepper, &layout);
                return Ok(());
            }
            Command::Wait(ms) => {
                self.clock += Duration::from_millis(*ms);
                let layout = self.layout();
                self.engine.tick(&self.stepper, self.clock, &layout);
                return Ok(());
            }
        }
        self.observe();
        Ok(())
    }

    /// Apply a sequence of events, stopping at the first error
    pub fn run(&mut self, commands: &[Command]) -> Result<()> {
        for command in commands {
            self.apply(command)?;
        }
        info!(
            "Ran {} commands; t={}ms, {} geometry passes",
            commands.len(),
            self.clock.as_millis(),
            self.engine.geometry_passes()
        );
        Ok(())
    }

    fn observe(&mut self) {
        let layout = self.layout();
        self.engine.observe(&self.stepper, self.clock, &layout);
    }

    fn controls_shown(&self) -> bool {
        self.stepper.selected_example().is_some()
    }

    /// Scene for the current state
    pub fn scene(&self) -> Scene {
        self.engine.scene(&self.stepper)
    }

    /// Layout of the current scene
    pub fn layout(&self) -> FlowLayout {
        FlowLayout::build(&self.scene(), &self.layout_config)
    }

    /// One button per example; all disabled while the demo runs
    pub fn scenario_buttons(&self) -> Vec<ScenarioButton> {
        let selected = self.stepper.selected_example().map(|e| e.id.as_str());
        self.engine
            .dataset()
            .examples()
            .iter()
            .map(|e| ScenarioButton {
                id: e.id.clone(),
                label: e.name.clone(),
                selected: selected == Some(e.id.as_str()),
                enabled: !self.stepper.is_translating(),
            })
            .collect()
    }

    /// Demo controls; empty while no example is selected
    pub fn controls(&self) -> Vec<ControlButton> {
        if !self.controls_shown() {
            return Vec::new();
        }
        if !self.stepper.is_translating() {
            return vec![ControlButton {
                label: START_LABEL,
                enabled: true,
            }];
        }
        let next = if self.stepper.is_finished() {
            COMPLETE_LABEL
        } else {
            NEXT_LABEL
        };
        vec![
            ControlButton {
                label: next,
                enabled: self.stepper.can_step_forward(),
            },
            ControlButton {
                label: RESET_LABEL,
                enabled: true,
            },
        ]
    }

    /// SVG of the visualization panel
    pub fn render_svg(&self) -> Result<String> {
        let scene = self.scene();
        let layout = FlowLayout::build(&scene, &self.layout_config);
        render_svg(&scene, &layout)
    }

    /// Text rendering of the whole page
    pub fn render_text(&self) -> String {
        let mut out = format!("=== {} ===\n{}\n\n", TITLE, INTRO);

        let buttons: Vec<String> = self
            .scenario_buttons()
            .iter()
            .map(|b| {
                let mark = if b.selected { "*" } else { " " };
                let state = if b.enabled { "" } else { " (disabled)" };
                format!("[{}{}]{}", mark, b.label, state)
            })
            .collect();
        out.push_str(&format!("Scenarios: {}\n", buttons.join(" ")));

        let controls = self.controls();
        if !controls.is_empty() {
            let labels: Vec<String> = controls
                .iter()
                .map(|c| {
                    if c.enabled {
                        format!("<{}>", c.label)
                    } else {
                        format!("<{} (disabled)>", c.label)
                    }
                })
                .collect();
            out.push_str(&format!("Controls: {}\n", labels.join(" ")));
        }
        if let (Some(step), Some(example)) =
            (self.stepper.current_step(), self.stepper.selected_example())
        {
            out.push_str(&format!("Step {}/{}\n", step + 1, example.n_steps()));
        }
        out.push('\n');
        out.push_str(&render_text(&self.scene()));

        out.push_str(&format!(
            "\n--- {} ---\n{}\n{}\n{}\n",
            EXPLAINER_TITLE, EXPLAINER_QUOTE, EXPLAINER_LOCAL, EXPLAINER_GLOBAL
        ));
        out
    }

    /// Print the text rendering to stdout
    pub fn print_summary(&self) {
        println!("{}", self.render_text());
    }
}
