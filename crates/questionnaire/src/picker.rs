use std::collections::VecDeque;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::answer::format_list;
use crate::error::PickerError;

/// Result of presenting a list once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pick {
    Selected { index: usize, option: String },
    /// The user asked to return to the previous question.
    Back,
}

/// Boundary to whatever displays a list and reads the user's choice.
pub trait Picker {
    fn pick(
        &mut self,
        options: &[String],
        prompt: &str,
        indicator: &str,
    ) -> Result<Pick, PickerError>;
}

impl<P: Picker + ?Sized> Picker for &mut P {
    fn pick(
        &mut self,
        options: &[String],
        prompt: &str,
        indicator: &str,
    ) -> Result<Pick, PickerError> {
        (**self).pick(options, prompt, indicator)
    }
}

/// Labels used by the list pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PickerConfig {
    /// Marker drawn next to the highlighted option.
    #[serde(default = "default_indicator")]
    pub indicator: String,
    /// Sentinel offered first in multi-select lists.
    #[serde(default = "default_all")]
    pub all: String,
    /// Sentinel offered last in multi-select lists; ends the selection.
    #[serde(default = "default_done")]
    pub done: String,
}

fn default_indicator() -> String {
    "=>".into()
}

fn default_all() -> String {
    "all".into()
}

fn default_done() -> String {
    "done...".into()
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            indicator: default_indicator(),
            all: default_all(),
            done: default_done(),
        }
    }
}

/// Outcome of a multi-select prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiPick {
    pub selections: Vec<String>,
    pub navigated_back: bool,
}

/// Asks for one option. `None` means the user navigated back.
pub fn pick_one<P: Picker + ?Sized>(
    picker: &mut P,
    options: &[String],
    prompt: &str,
    config: &PickerConfig,
) -> Result<Option<String>, PickerError> {
    if options.is_empty() {
        return Err(PickerError::NoOptions);
    }
    match picker.pick(options, prompt, &config.indicator)? {
        Pick::Selected { option, .. } => Ok(Some(option)),
        Pick::Back => Ok(None),
    }
}

/// Asks for options one at a time until the user picks the done sentinel.
///
/// Picking the all sentinel returns a list holding only that sentinel.
/// Navigating back returns whatever was selected so far.
pub fn pick_many<P: Picker + ?Sized>(
    picker: &mut P,
    options: &[String],
    prompt: &str,
    config: &PickerConfig,
) -> Result<MultiPick, PickerError> {
    let mut pool = Vec::with_capacity(options.len() + 2);
    pool.push(config.all.clone());
    pool.extend(options.iter().cloned());
    pool.push(config.done.clone());

    let mut selections = Vec::new();
    loop {
        let shown = format!("{}{}", prompt, format_list(&selections));
        let Some(option) = pick_one(picker, &pool, &shown, config)? else {
            return Ok(MultiPick {
                selections,
                navigated_back: true,
            });
        };
        if option == config.all {
            return Ok(MultiPick {
                selections: vec![config.all.clone()],
                navigated_back: false,
            });
        }
        if option == config.done {
            return Ok(MultiPick {
                selections,
                navigated_back: false,
            });
        }
        if let Some(position) = pool.iter().position(|candidate| *candidate == option) {
            pool.remove(position);
        }
        selections.push(option);
    }
}

/// One scripted user action.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ScriptStep {
    Choose(String),
    Back,
}

impl ScriptStep {
    pub const BACK: &'static str = "<back>";
}

impl From<String> for ScriptStep {
    fn from(label: String) -> Self {
        if label == Self::BACK {
            ScriptStep::Back
        } else {
            ScriptStep::Choose(label)
        }
    }
}

impl From<&str> for ScriptStep {
    fn from(label: &str) -> Self {
        ScriptStep::from(label.to_string())
    }
}

/// Replays a fixed list of actions instead of reading a terminal.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPicker {
    steps: VecDeque<ScriptStep>,
    transcript: Vec<String>,
}

impl ScriptedPicker {
    pub fn new<S: Into<ScriptStep>>(steps: impl IntoIterator<Item = S>) -> Self {
        Self {
            steps: steps.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    /// Every prompt shown so far, in order.
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

impl Picker for ScriptedPicker {
    fn pick(
        &mut self,
        options: &[String],
        prompt: &str,
        _indicator: &str,
    ) -> Result<Pick, PickerError> {
        self.transcript.push(prompt.to_string());
        let step = self
            .steps
            .pop_front()
            .ok_or_else(|| PickerError::ScriptExhausted {
                prompt: prompt.to_string(),
            })?;
        match step {
            ScriptStep::Back => Ok(Pick::Back),
            ScriptStep::Choose(option) => {
                let index = options
                    .iter()
                    .position(|candidate| *candidate == option)
                    .ok_or_else(|| PickerError::UnknownOption {
                        option: option.clone(),
                        available: options.join(", "),
                    })?;
                Ok(Pick::Selected { index, option })
            }
        }
    }
}
