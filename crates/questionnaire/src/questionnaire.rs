use tracing::debug;

use crate::answer::{Answer, Choices};
use crate::error::Result;
use crate::picker::{Picker, PickerConfig, pick_many, pick_one};
use crate::question::{Prompter, Question};

/// Registered questions plus the answers recorded during a run.
#[derive(Debug, Clone, Default)]
pub struct Questionnaire {
    questions: Vec<(String, Vec<Question>)>,
    choices: Choices,
    picker_config: PickerConfig,
}

impl Questionnaire {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_picker_config(mut self, config: PickerConfig) -> Self {
        self.picker_config = config;
        self
    }

    pub fn picker_config(&self) -> &PickerConfig {
        &self.picker_config
    }

    /// Registers a question variant under its key. Repeated keys are
    /// variants, tried in registration order.
    pub fn add_question(&mut self, question: Question) -> &mut Question {
        let position = match self
            .questions
            .iter()
            .position(|(key, _)| key == question.key())
        {
            Some(position) => position,
            None => {
                self.questions.push((question.key().to_string(), Vec::new()));
                self.questions.len() - 1
            }
        };
        let variants = &mut self.questions[position].1;
        variants.push(question);
        let last = variants.len() - 1;
        &mut variants[last]
    }

    /// Builds and registers a question; chain `add_condition` on the result.
    pub fn add<K, O>(&mut self, key: K, options: O, prompter: Prompter) -> Result<&mut Question>
    where
        K: Into<String>,
        O: IntoIterator,
        O::Item: Into<String>,
    {
        let question = Question::new(key, options, prompter)?;
        Ok(self.add_question(question))
    }

    /// Question keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.questions.iter().map(|(key, _)| key.as_str())
    }

    pub fn variants(&self, key: &str) -> Option<&[Question]> {
        self.questions
            .iter()
            .find(|(entry, _)| entry == key)
            .map(|(_, variants)| variants.as_slice())
    }

    pub fn questions(&self) -> impl Iterator<Item = (&str, &[Question])> {
        self.questions
            .iter()
            .map(|(key, variants)| (key.as_str(), variants.as_slice()))
    }

    pub fn choices(&self) -> &Choices {
        &self.choices
    }

    /// First variant of `key` whose condition holds against the answers so
    /// far, or `None` when the key should be skipped.
    pub fn which_question(&self, key: &str) -> Result<Option<&Question>> {
        let Some(variants) = self.variants(key) else {
            return Ok(None);
        };
        for (index, question) in variants.iter().enumerate() {
            let applies = match question.condition() {
                Some(condition) => condition.evaluate(&self.choices)?,
                None => true,
            };
            if applies {
                debug!(key, variant = index, "resolved question variant");
                return Ok(Some(question));
            }
        }
        debug!(key, "no variant applies; skipping");
        Ok(None)
    }

    /// The answers so far as right-aligned `key : value` lines.
    pub fn show_choices(&self) -> String {
        let width = self.keys().map(str::len).max().unwrap_or(0) + 5;
        let mut text = String::new();
        for (key, answer) in self.choices.iter() {
            text.push_str(&format!("{:>width$} : {}\n", key, answer, width = width));
        }
        text
    }

    /// Drops the last `steps` recorded answers.
    pub fn go_back(&mut self, steps: usize) {
        self.choices.rewind(steps);
    }

    /// Asks `key` and records the answer. Returns `false` when the user
    /// navigated back instead, after rewinding the recorded answers.
    pub fn prompt<P: Picker + ?Sized>(
        &mut self,
        picker: &mut P,
        key: &str,
        options: &[String],
        multiple: bool,
    ) -> Result<bool> {
        let text = format!("{}\n{}: ", self.show_choices(), key);

        let answer = if multiple {
            let outcome = pick_many(picker, options, &text, &self.picker_config)?;
            if outcome.navigated_back {
                // Partial selections only abandon this key; an untouched
                // list steps back to the previous answer.
                if outcome.selections.is_empty() {
                    self.step_back(key);
                } else {
                    debug!(key, discarded = outcome.selections.len(), "restarting question");
                }
                return Ok(false);
            }
            Answer::Multiple(outcome.selections)
        } else {
            match pick_one(picker, options, &text, &self.picker_config)? {
                Some(selection) => Answer::Single(selection),
                None => {
                    self.step_back(key);
                    return Ok(false);
                }
            }
        };

        debug!(key, answer = %answer, "recorded answer");
        self.choices.insert(key, answer);
        Ok(true)
    }

    fn step_back(&mut self, from: &str) {
        match self.choices.pop() {
            Some((previous, _)) => debug!(from, to = %previous, "navigated back"),
            None => debug!(from, "navigated back at first question"),
        }
    }

    /// One pass over every key in registration order. Returns `false` as soon
    /// as a prompt navigates back.
    pub fn ask_questions<P: Picker + ?Sized>(&mut self, picker: &mut P) -> Result<bool> {
        let keys: Vec<String> = self.keys().map(String::from).collect();
        for key in &keys {
            if self.choices.contains_key(key) {
                continue;
            }
            let Some(question) = self.which_question(key)? else {
                continue;
            };
            let options = question.options().to_vec();
            let multiple = question.multiple();
            if !self.prompt(picker, key, &options, multiple)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Clears previous answers and repeats passes until one completes
    /// without navigating back.
    pub fn run<P: Picker + ?Sized>(&mut self, picker: &mut P) -> Result<Choices> {
        self.choices.clear();
        let mut passes = 0usize;
        loop {
            passes += 1;
            if self.ask_questions(picker)? {
                debug!(passes, answered = self.choices.len(), "questionnaire complete");
                return Ok(self.choices.clone());
            }
        }
    }
}
