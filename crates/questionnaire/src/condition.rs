use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::answer::{Answer, Choices};
use crate::error::{QuestionnaireError, Result};

type Predicate = dyn Fn(&Answer, &Answer) -> bool + Send + Sync;

/// Comparison applied as `operator(value, recorded_answer)`.
#[derive(Clone)]
pub enum Operator {
    Eq,
    Ne,
    Le,
    Ge,
    In,
    NotIn,
    Custom(Arc<Predicate>),
}

impl Operator {
    /// Wraps a caller-supplied two-argument predicate.
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&Answer, &Answer) -> bool + Send + Sync + 'static,
    {
        Operator::Custom(Arc::new(predicate))
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Eq => "==",
            Operator::Ne => "!=",
            Operator::Le => "<=",
            Operator::Ge => ">=",
            Operator::In => "in",
            Operator::NotIn => "not in",
            Operator::Custom(_) => "<custom>",
        }
    }

    pub fn apply(&self, value: &Answer, answer: &Answer) -> bool {
        match self {
            Operator::Eq => value == answer,
            Operator::Ne => value != answer,
            Operator::Le => matches!(
                value.compare(answer),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Operator::Ge => matches!(
                value.compare(answer),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Operator::In => value.is_in(answer),
            Operator::NotIn => !value.is_in(answer),
            Operator::Custom(predicate) => predicate(value, answer),
        }
    }

    /// Resolves a list of operator symbols, failing on the first unknown one.
    pub fn parse_all<S: AsRef<str>>(symbols: &[S]) -> Result<Vec<Operator>> {
        symbols
            .iter()
            .map(|symbol| symbol.as_ref().parse())
            .collect()
    }
}

impl FromStr for Operator {
    type Err = QuestionnaireError;

    fn from_str(symbol: &str) -> Result<Self> {
        match symbol.trim() {
            "==" => Ok(Operator::Eq),
            "!=" => Ok(Operator::Ne),
            "<=" => Ok(Operator::Le),
            ">=" => Ok(Operator::Ge),
            "in" => Ok(Operator::In),
            "not in" => Ok(Operator::NotIn),
            other => Err(QuestionnaireError::InvalidCondition(format!(
                "unknown operator '{}'",
                other
            ))),
        }
    }
}

impl fmt::Debug for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Serializable condition as written in a questionnaire definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConditionSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vals: Option<Vec<Answer>>,
    /// Operator symbols; every clause defaults to `==` when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operators: Option<Vec<String>>,
}

impl ConditionSpec {
    pub fn new<K, V>(keys: K, vals: V) -> Self
    where
        K: IntoIterator,
        K::Item: Into<String>,
        V: IntoIterator,
        V::Item: Into<Answer>,
    {
        Self {
            keys: Some(keys.into_iter().map(Into::into).collect()),
            vals: Some(vals.into_iter().map(Into::into).collect()),
            operators: None,
        }
    }

    pub fn with_operators<S: Into<String>>(mut self, operators: impl IntoIterator<Item = S>) -> Self {
        self.operators = Some(operators.into_iter().map(Into::into).collect());
        self
    }

    /// Builds the condition, or `None` when keys or vals are missing.
    pub fn build(&self) -> Result<Option<Condition>> {
        let (Some(keys), Some(vals)) = (&self.keys, &self.vals) else {
            return Ok(None);
        };
        let operators = self
            .operators
            .as_deref()
            .map(Operator::parse_all)
            .transpose()?;
        Condition::new(keys.clone(), vals.clone(), operators).map(Some)
    }
}

#[derive(Debug, Clone)]
struct Clause {
    key: String,
    value: Answer,
    operator: Operator,
}

/// Conjunction of `(key, value, operator)` clauses over recorded answers.
#[derive(Debug, Clone, Default)]
pub struct Condition {
    clauses: Vec<Clause>,
}

impl Condition {
    /// Zips the three lists into clauses. Without operators every clause uses `==`.
    pub fn new<K, V>(keys: K, vals: V, operators: Option<Vec<Operator>>) -> Result<Self>
    where
        K: IntoIterator,
        K::Item: Into<String>,
        V: IntoIterator,
        V::Item: Into<Answer>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        let vals: Vec<Answer> = vals.into_iter().map(Into::into).collect();
        let operators = operators.unwrap_or_else(|| vec![Operator::Eq; keys.len()]);

        if keys.len() != vals.len() || keys.len() != operators.len() {
            return Err(QuestionnaireError::InvalidCondition(format!(
                "keys, vals and operators must have the same length (got {}, {}, {})",
                keys.len(),
                vals.len(),
                operators.len()
            )));
        }

        let clauses = keys
            .into_iter()
            .zip(vals)
            .zip(operators)
            .map(|((key, value), operator)| Clause {
                key,
                value,
                operator,
            })
            .collect();
        Ok(Self { clauses })
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.clauses.iter().map(|clause| clause.key.as_str())
    }

    pub fn vals(&self) -> impl Iterator<Item = &Answer> {
        self.clauses.iter().map(|clause| &clause.value)
    }

    pub fn operators(&self) -> impl Iterator<Item = &Operator> {
        self.clauses.iter().map(|clause| &clause.operator)
    }

    /// Appends the clauses of `other`; both must hold afterwards.
    pub fn extend(&mut self, other: Condition) {
        self.clauses.extend(other.clauses);
    }

    /// Checks every clause against `choices`.
    ///
    /// A clause whose key has no recorded answer is a configuration bug and
    /// fails with [`QuestionnaireError::MissingAnswer`].
    pub fn evaluate(&self, choices: &Choices) -> Result<bool> {
        for clause in &self.clauses {
            let answer =
                choices
                    .get(&clause.key)
                    .ok_or_else(|| QuestionnaireError::MissingAnswer {
                        key: clause.key.clone(),
                    })?;
            if !clause.operator.apply(&clause.value, answer) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
