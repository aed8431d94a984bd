use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An uploaded résumé document, held in memory for the lifetime of one request.
#[derive(Debug, Clone)]
pub struct FileInput {
    pub bytes: Bytes,
    pub declared_name: Option<String>,
    pub declared_size: u64,
}

impl FileInput {
    pub fn new(declared_name: Option<String>, bytes: Bytes) -> Self {
        Self {
            declared_size: bytes.len() as u64,
            bytes,
            declared_name,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn filename(&self) -> &str {
        self.declared_name.as_deref().unwrap_or_default()
    }
}

/// Raw résumé text pasted by the user.
#[derive(Debug, Clone)]
pub struct TextInput {
    pub content: Option<String>,
}

/// A résumé accepted for analysis, with its optional job description already normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub resume_text: String,
    pub job_description: Option<String>,
}

/// Body of `POST /resume/analyze-text`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeTextBody {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub job_description: Option<String>,
}

/// Body of `POST /resume/generate-interview-questions`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewQuestionsBody {
    #[serde(default)]
    pub resume_text: Option<String>,
    #[serde(default)]
    pub job_description: Option<String>,
}

/// Text extracted from an upload, returned so the user can review it before analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedResume {
    pub extracted_text: String,
    pub filename: String,
}

/// Provider analysis payload. Relayed as-is; the service never builds one itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisResult(pub Value);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewQuestion {
    pub id: u32,
    #[serde(rename = "question")]
    pub text: String,
    #[serde(rename = "expectedDuration")]
    pub allocated_seconds: u32,
}
