#![allow(missing_docs)]

pub mod answer;
pub mod condition;
pub mod error;
pub mod lint;
pub mod picker;
pub mod question;
pub mod questionnaire;
pub mod spec;

pub use answer::{Answer, Choices};
pub use condition::{Condition, ConditionSpec, Operator};
pub use error::{PickerError, QuestionnaireError, SpecError};
pub use lint::{IssueKind, LintIssue, LintReport, check_references};
pub use picker::{
    MultiPick, Pick, Picker, PickerConfig, ScriptStep, ScriptedPicker, pick_many, pick_one,
};
pub use question::{Prompter, Question};
pub use questionnaire::Questionnaire;
pub use spec::{QuestionSpec, QuestionnaireSpec};
