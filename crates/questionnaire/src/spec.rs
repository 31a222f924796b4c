use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::condition::ConditionSpec;
use crate::error::SpecError;
use crate::picker::PickerConfig;
use crate::question::{Prompter, Question};
use crate::questionnaire::Questionnaire;

/// A question variant as written in a questionnaire definition file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QuestionSpec {
    pub key: String,
    pub options: Vec<String>,
    #[serde(default)]
    pub prompter: Prompter,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<ConditionSpec>,
}

/// Top-level questionnaire definition. Question order is registration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QuestionnaireSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picker: Option<PickerConfig>,
    pub questions: Vec<QuestionSpec>,
}

impl QuestionnaireSpec {
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        serde_json::from_str(json).map_err(SpecError::Parse)
    }

    pub fn build(&self) -> Result<Questionnaire, SpecError> {
        if self.questions.is_empty() {
            return Err(SpecError::Empty);
        }
        let mut questionnaire =
            Questionnaire::new().with_picker_config(self.picker.clone().unwrap_or_default());
        for spec in &self.questions {
            let mut question = Question::new(&spec.key, &spec.options, spec.prompter)?;
            if let Some(condition) = &spec.condition {
                question = question.with_condition(condition)?;
            }
            questionnaire.add_question(question);
        }
        Ok(questionnaire)
    }
}

/// JSON schema describing questionnaire definition files.
pub fn schema() -> schemars::Schema {
    schemars::schema_for!(QuestionnaireSpec)
}
