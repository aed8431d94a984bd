// Recording fakes for the pipeline's collaborators. Test-only.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use crate::document::{DocumentParser, ParseError};
use crate::models::resume::{AnalysisResult, FileInput, InterviewQuestion, TextInput};
use crate::resume::analysis::{AnalysisClient, ProviderError};
use crate::resume::pipeline::ResumePipeline;
use crate::resume::validation::{has_supported_extension, FileRules, ValidationLimits};

pub(crate) struct FakeParser {
    result: Result<String, String>,
    max_bytes: usize,
    calls: AtomicUsize,
}

impl FakeParser {
    pub(crate) fn returning(text: &str) -> Arc<Self> {
        Arc::new(Self {
            result: Ok(text.to_string()),
            max_bytes: ValidationLimits::default().max_upload_bytes,
            calls: AtomicUsize::new(0),
        })
    }

    pub(crate) fn failing(detail: &str) -> Arc<Self> {
        Arc::new(Self {
            result: Err(detail.to_string()),
            max_bytes: ValidationLimits::default().max_upload_bytes,
            calls: AtomicUsize::new(0),
        })
    }

    /// Accepts at most `max_bytes`; extraction would succeed.
    pub(crate) fn capped(max_bytes: usize) -> Arc<Self> {
        Arc::new(Self {
            result: Ok(resume_text(80)),
            max_bytes,
            calls: AtomicUsize::new(0),
        })
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl FileRules for FakeParser {
    fn is_supported_extension(&self, filename: &str) -> bool {
        has_supported_extension(filename)
    }

    fn max_allowed_bytes(&self) -> usize {
        self.max_bytes
    }
}

#[async_trait]
impl DocumentParser for FakeParser {
    async fn extract_text(&self, _file: FileInput) -> Result<String, ParseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone().map_err(ParseError::Pdf)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordedCall {
    pub method: &'static str,
    pub resume_text: String,
    pub job_description: Option<String>,
}

pub(crate) struct FakeAnalyzer {
    failure: Option<String>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeAnalyzer {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            failure: None,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn failing(detail: &str) -> Arc<Self> {
        Arc::new(Self {
            failure: Some(detail.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn analysis() -> AnalysisResult {
        AnalysisResult(json!({
            "overall_score": 74,
            "summary": "CV rõ ràng, cần thêm số liệu",
            "kinh_nghiem_lam_viec": { "noi_dung": "a", "de_xuat": "b", "ly_do": "c" },
            "job_match": null
        }))
    }

    pub(crate) fn questions() -> Vec<InterviewQuestion> {
        vec![
            InterviewQuestion {
                id: 1,
                text: "Hãy giới thiệu về bản thân".to_string(),
                allocated_seconds: 60,
            },
            InterviewQuestion {
                id: 2,
                text: "Dự án nào bạn tự hào nhất?".to_string(),
                allocated_seconds: 180,
            },
        ]
    }

    pub(crate) fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, method: &'static str, resume_text: &str, job_description: Option<&str>) {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            resume_text: resume_text.to_string(),
            job_description: job_description.map(str::to_string),
        });
    }

    fn outcome<T>(&self, value: T) -> Result<T, ProviderError> {
        match &self.failure {
            Some(detail) => Err(ProviderError::Malformed(detail.clone())),
            None => Ok(value),
        }
    }
}

#[async_trait]
impl AnalysisClient for FakeAnalyzer {
    async fn analyze(
        &self,
        resume_text: &str,
        job_description: Option<&str>,
    ) -> Result<AnalysisResult, ProviderError> {
        self.record("analyze", resume_text, job_description);
        self.outcome(Self::analysis())
    }

    async fn generate_questions(
        &self,
        resume_text: &str,
        job_description: Option<&str>,
    ) -> Result<Vec<InterviewQuestion>, ProviderError> {
        self.record("generate_questions", resume_text, job_description);
        self.outcome(Self::questions())
    }
}

pub(crate) fn pipeline(parser: Arc<FakeParser>, analyzer: Arc<FakeAnalyzer>) -> ResumePipeline {
    ResumePipeline::new(parser, analyzer, ValidationLimits::default())
}

/// `len` characters of résumé-like text with no surrounding whitespace.
pub(crate) fn resume_text(len: usize) -> String {
    "KỹSưPhầnMềmRust".chars().cycle().take(len).collect()
}

pub(crate) fn text_input(text: &str) -> TextInput {
    TextInput {
        content: Some(text.to_string()),
    }
}
