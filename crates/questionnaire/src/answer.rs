use std::cmp::Ordering;
use std::fmt;

use schemars::JsonSchema;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// A recorded answer, or a value a condition compares answers against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Answer {
    Single(String),
    Multiple(Vec<String>),
}

impl Answer {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Answer::Single(value) => Some(value.as_str()),
            Answer::Multiple(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Answer::Single(_) => None,
            Answer::Multiple(values) => Some(values.as_slice()),
        }
    }

    /// Ordering between answers of the same shape; mixed shapes are unordered.
    pub fn compare(&self, other: &Answer) -> Option<Ordering> {
        match (self, other) {
            (Answer::Single(left), Answer::Single(right)) => Some(left.cmp(right)),
            (Answer::Multiple(left), Answer::Multiple(right)) => Some(left.cmp(right)),
            _ => None,
        }
    }

    /// Whether `self` occurs in `container`: substring of a single answer,
    /// or element of a list answer.
    pub fn is_in(&self, container: &Answer) -> bool {
        match (self, container) {
            (Answer::Single(needle), Answer::Single(haystack)) => haystack.contains(needle.as_str()),
            (Answer::Single(needle), Answer::Multiple(items)) => items.contains(needle),
            (Answer::Multiple(_), _) => false,
        }
    }
}

impl From<&str> for Answer {
    fn from(value: &str) -> Self {
        Answer::Single(value.to_string())
    }
}

impl From<String> for Answer {
    fn from(value: String) -> Self {
        Answer::Single(value)
    }
}

impl From<Vec<String>> for Answer {
    fn from(values: Vec<String>) -> Self {
        Answer::Multiple(values)
    }
}

impl From<Vec<&str>> for Answer {
    fn from(values: Vec<&str>) -> Self {
        Answer::Multiple(values.into_iter().map(String::from).collect())
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Single(value) => f.write_str(value),
            Answer::Multiple(values) => f.write_str(&format_list(values)),
        }
    }
}

/// Renders a selection list the way prompts show it: `['a', 'b']`.
pub fn format_list(values: &[String]) -> String {
    let quoted = values
        .iter()
        .map(|value| format!("'{}'", value))
        .collect::<Vec<_>>();
    format!("[{}]", quoted.join(", "))
}

/// Answers keyed by question, kept in the order they were recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Choices {
    entries: Vec<(String, Answer)>,
}

impl Choices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Answer> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == key)
            .map(|(_, answer)| answer)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Records `answer` under `key`. An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, answer: impl Into<Answer>) {
        let key = key.into();
        let answer = answer.into();
        match self.entries.iter_mut().find(|(entry, _)| *entry == key) {
            Some((_, slot)) => *slot = answer,
            None => self.entries.push((key, answer)),
        }
    }

    /// Removes the most recently recorded answer.
    pub fn pop(&mut self) -> Option<(String, Answer)> {
        self.entries.pop()
    }

    /// Removes the last `steps` recorded answers.
    pub fn rewind(&mut self, steps: usize) {
        let keep = self.entries.len().saturating_sub(steps);
        self.entries.truncate(keep);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Answer)> {
        self.entries.iter().map(|(key, answer)| (key.as_str(), answer))
    }
}

impl<K: Into<String>, A: Into<Answer>> FromIterator<(K, A)> for Choices {
    fn from_iter<I: IntoIterator<Item = (K, A)>>(iter: I) -> Self {
        let mut choices = Choices::new();
        for (key, answer) in iter {
            choices.insert(key, answer);
        }
        choices
    }
}

impl IntoIterator for Choices {
    type Item = (String, Answer);
    type IntoIter = std::vec::IntoIter<(String, Answer)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for Choices {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, answer) in &self.entries {
            map.serialize_entry(key, answer)?;
        }
        map.end()
    }
}
