//! AI analysis collaborator: résumé scoring and interview question generation.
//!
//! The pipeline holds an `Arc<dyn AnalysisClient>`. `LlmAnalysisClient` is the
//! production backend; tests substitute recording fakes.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::llm_client::{LlmClient, LlmError};
use crate::models::resume::{AnalysisResult, InterviewQuestion};
use crate::resume::prompts::{
    analysis_system, questions_system, render, ANALYSIS_PROMPT_TEMPLATE,
    QUESTIONS_PROMPT_TEMPLATE,
};

/// Answer time assigned when the provider omits one.
pub const DEFAULT_QUESTION_SECONDS: u32 = 120;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("AI provider returned an unusable payload: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait AnalysisClient: Send + Sync {
    async fn analyze(
        &self,
        resume_text: &str,
        job_description: Option<&str>,
    ) -> Result<AnalysisResult, ProviderError>;

    /// Questions come back in the provider's order.
    async fn generate_questions(
        &self,
        resume_text: &str,
        job_description: Option<&str>,
    ) -> Result<Vec<InterviewQuestion>, ProviderError>;
}

pub struct LlmAnalysisClient {
    llm: LlmClient,
}

impl LlmAnalysisClient {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl AnalysisClient for LlmAnalysisClient {
    async fn analyze(
        &self,
        resume_text: &str,
        job_description: Option<&str>,
    ) -> Result<AnalysisResult, ProviderError> {
        let prompt = render(ANALYSIS_PROMPT_TEMPLATE, resume_text, job_description);
        let value: serde_json::Value = self.llm.call_json(&prompt, &analysis_system()).await?;
        into_analysis(value)
    }

    async fn generate_questions(
        &self,
        resume_text: &str,
        job_description: Option<&str>,
    ) -> Result<Vec<InterviewQuestion>, ProviderError> {
        let prompt = render(QUESTIONS_PROMPT_TEMPLATE, resume_text, job_description);
        let payload: QuestionsPayload = self.llm.call_json(&prompt, &questions_system()).await?;
        debug!(count = payload.questions.len(), "Provider returned interview questions");
        Ok(number_questions(payload))
    }
}

#[derive(Debug, Deserialize)]
struct QuestionsPayload {
    questions: Vec<RawQuestion>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuestion {
    question: String,
    #[serde(default)]
    expected_duration: Option<u32>,
}

/// The analysis is opaque to us, but it must at least be an object.
fn into_analysis(value: serde_json::Value) -> Result<AnalysisResult, ProviderError> {
    if value.is_object() {
        Ok(AnalysisResult(value))
    } else {
        Err(ProviderError::Malformed(format!(
            "expected a JSON object, got {}",
            json_type_name(&value)
        )))
    }
}

/// Ids follow provider order, starting at 1.
fn number_questions(payload: QuestionsPayload) -> Vec<InterviewQuestion> {
    payload
        .questions
        .into_iter()
        .zip(1..)
        .map(|(raw, id)| InterviewQuestion {
            id,
            text: raw.question,
            allocated_seconds: raw.expected_duration.unwrap_or(DEFAULT_QUESTION_SECONDS),
        })
        .collect()
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
