use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::answer::Answer;
use crate::condition::{Condition, ConditionSpec, Operator};
use crate::error::{QuestionnaireError, Result};

/// How many options a question accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Prompter {
    #[default]
    Single,
    Multiple,
}

impl Prompter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Prompter::Single => "single",
            Prompter::Multiple => "multiple",
        }
    }
}

impl FromStr for Prompter {
    type Err = String;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label {
            "single" => Ok(Prompter::Single),
            "multiple" => Ok(Prompter::Multiple),
            other => Err(format!("unknown prompter '{}'", other)),
        }
    }
}

impl fmt::Display for Prompter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One variant of a question. Several variants may share a key, each gated
/// by its own condition.
#[derive(Debug, Clone)]
pub struct Question {
    key: String,
    options: Vec<String>,
    prompter: Prompter,
    condition: Option<Condition>,
}

impl Question {
    pub fn new<K, O>(key: K, options: O, prompter: Prompter) -> Result<Self>
    where
        K: Into<String>,
        O: IntoIterator,
        O::Item: Into<String>,
    {
        let key = key.into();
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        if options.is_empty() {
            return Err(QuestionnaireError::EmptyOptions { key });
        }
        Ok(Self {
            key,
            options,
            prompter,
            condition: None,
        })
    }

    /// Attaches a condition from its written form. A spec without both keys
    /// and vals leaves the question unconditional.
    pub fn with_condition(mut self, spec: &ConditionSpec) -> Result<Self> {
        if let Some(condition) = spec.build()? {
            self.attach(condition);
        }
        Ok(self)
    }

    /// Adds clauses to this question's condition; chained calls accumulate.
    pub fn add_condition<K, V>(
        &mut self,
        keys: K,
        vals: V,
        operators: Option<Vec<Operator>>,
    ) -> Result<&mut Self>
    where
        K: IntoIterator,
        K::Item: Into<String>,
        V: IntoIterator,
        V::Item: Into<Answer>,
    {
        let condition = Condition::new(keys, vals, operators)?;
        self.attach(condition);
        Ok(self)
    }

    fn attach(&mut self, condition: Condition) {
        match &mut self.condition {
            Some(existing) => existing.extend(condition),
            None => self.condition = Some(condition),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn prompter(&self) -> Prompter {
        self.prompter
    }

    pub fn multiple(&self) -> bool {
        matches!(self.prompter, Prompter::Multiple)
    }

    pub fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }
}
