//! Résumé request pipeline: gates untrusted input, then hands it to the collaborators.
//!
//! Flows:
//!   upload:    validate_file → parser.extract_text → validate_extracted_text
//!   analyze:   normalize JD → validate JD → validate résumé → analyzer.analyze
//!   questions: normalize JD → validate résumé (minimum only) → analyzer.generate_questions
//!
//! Each flow stops at the first failing gate. Collaborator failures are reported once
//! as `UpstreamFailure` and never retried here. The pipeline holds no mutable state
//! and is shared across requests behind an `Arc`.

use std::sync::Arc;

use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::document::DocumentParser;
use crate::errors::{AppError, ErrorKind, Rejection};
use crate::models::resume::{
    AnalysisRequest, AnalysisResult, FileInput, InterviewQuestion, TextInput, UploadedResume,
};
use crate::resume::analysis::AnalysisClient;
use crate::resume::validation::{
    normalize_job_description, validate_extracted_text, validate_file, validate_raw_text,
    FileRules, TextSubject, ValidationLimits,
};

/// Shown instead of collaborator detail when redaction is on.
const REDACTED_DETAIL: &str = "Dịch vụ xử lý tạm thời gặp sự cố. Vui lòng thử lại sau.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Upload,
    AnalyzeText,
    GenerateQuestions,
}

impl Operation {
    fn name(self) -> &'static str {
        match self {
            Operation::Upload => "upload",
            Operation::AnalyzeText => "analyze_text",
            Operation::GenerateQuestions => "generate_interview_questions",
        }
    }

    fn error_prefix(self) -> &'static str {
        match self {
            Operation::Upload => "Lỗi xử lý file: ",
            Operation::AnalyzeText => "Lỗi phân tích CV: ",
            Operation::GenerateQuestions => "Lỗi tạo câu hỏi phỏng vấn: ",
        }
    }
}

pub struct ResumePipeline {
    parser: Arc<dyn DocumentParser>,
    analyzer: Arc<dyn AnalysisClient>,
    limits: ValidationLimits,
    redact_upstream_errors: bool,
}

impl ResumePipeline {
    pub fn new(
        parser: Arc<dyn DocumentParser>,
        analyzer: Arc<dyn AnalysisClient>,
        limits: ValidationLimits,
    ) -> Self {
        Self {
            parser,
            analyzer,
            limits,
            redact_upstream_errors: false,
        }
    }

    pub fn redact_upstream_errors(mut self, redact: bool) -> Self {
        self.redact_upstream_errors = redact;
        self
    }

    /// The parser's upload cap. The size gate and the request body limit both use it.
    pub fn max_upload_bytes(&self) -> usize {
        self.parser.max_allowed_bytes()
    }

    /// Extracts and validates text from an upload. Never calls the AI provider:
    /// the user reviews the text before spending an analysis call on it.
    pub async fn handle_upload(&self, file: FileInput) -> Result<UploadedResume, AppError> {
        let span = info_span!("resume_upload", request_id = %Uuid::new_v4());
        self.upload(file).instrument(span).await
    }

    pub async fn handle_analyze_text(
        &self,
        resume: TextInput,
        job_description_raw: Option<String>,
    ) -> Result<AnalysisResult, AppError> {
        let span = info_span!("resume_analyze_text", request_id = %Uuid::new_v4());
        self.analyze_text(resume, job_description_raw)
            .instrument(span)
            .await
    }

    pub async fn handle_generate_interview_questions(
        &self,
        resume: TextInput,
        job_description_raw: Option<String>,
    ) -> Result<Vec<InterviewQuestion>, AppError> {
        let span = info_span!("resume_interview_questions", request_id = %Uuid::new_v4());
        self.generate_questions(resume, job_description_raw)
            .instrument(span)
            .await
    }

    async fn upload(&self, file: FileInput) -> Result<UploadedResume, AppError> {
        let op = Operation::Upload;
        info!(
            filename = file.filename(),
            size_bytes = file.declared_size,
            "Received resume upload"
        );

        validate_file(&file, self.parser.as_ref())
            .into_result()
            .map_err(|r| reject(op, r))?;

        let filename = file.filename().to_string();
        // `file` moves into the parser; its buffer is gone once this returns.
        let extracted = self
            .parser
            .extract_text(file)
            .await
            .map_err(|e| self.upstream(op, &e))?;

        let extracted_text = validate_extracted_text(&extracted, &self.limits)
            .into_result()
            .map_err(|r| reject(op, r))?;

        info!(
            chars = extracted_text.chars().count(),
            "Resume text extracted"
        );
        Ok(UploadedResume {
            extracted_text,
            filename,
        })
    }

    async fn analyze_text(
        &self,
        resume: TextInput,
        job_description_raw: Option<String>,
    ) -> Result<AnalysisResult, AppError> {
        let op = Operation::AnalyzeText;
        let job_description = normalize_job_description(job_description_raw);
        info!(
            resume_chars = char_count(resume.content.as_deref()),
            has_job_description = job_description.is_some(),
            "Received resume analysis request"
        );

        if let Some(jd) = job_description.as_deref() {
            validate_raw_text(
                Some(jd),
                TextSubject::JobDescription,
                &self.limits.job_description(),
            )
            .into_result()
            .map_err(|r| reject(op, r))?;
        }

        let resume_text = validate_raw_text(
            resume.content.as_deref(),
            TextSubject::Resume,
            &self.limits.resume_for_analysis(),
        )
        .into_result()
        .map_err(|r| reject(op, r))?;

        let request = AnalysisRequest {
            resume_text,
            job_description,
        };

        let result = self
            .analyzer
            .analyze(&request.resume_text, request.job_description.as_deref())
            .await
            .map_err(|e| self.upstream(op, &e))?;

        info!(
            fields = result.0.as_object().map_or(0, |o| o.len()),
            "Resume analysis completed"
        );
        Ok(result)
    }

    async fn generate_questions(
        &self,
        resume: TextInput,
        job_description_raw: Option<String>,
    ) -> Result<Vec<InterviewQuestion>, AppError> {
        let op = Operation::GenerateQuestions;
        let job_description = normalize_job_description(job_description_raw);
        info!(
            resume_chars = char_count(resume.content.as_deref()),
            has_job_description = job_description.is_some(),
            "Received interview question request"
        );

        let resume_text = validate_raw_text(
            resume.content.as_deref(),
            TextSubject::ResumeForQuestions,
            &self.limits.resume_for_questions(),
        )
        .into_result()
        .map_err(|r| reject(op, r))?;

        let questions = self
            .analyzer
            .generate_questions(&resume_text, job_description.as_deref())
            .await
            .map_err(|e| self.upstream(op, &e))?;

        info!(count = questions.len(), "Interview questions generated");
        Ok(questions)
    }

    fn upstream(&self, op: Operation, err: &dyn std::error::Error) -> AppError {
        error!(
            operation = op.name(),
            kind = ErrorKind::UpstreamFailure.code(),
            error = %err,
            "Upstream collaborator failed"
        );
        let detail = if self.redact_upstream_errors {
            REDACTED_DETAIL.to_string()
        } else {
            err.to_string()
        };
        AppError::Upstream {
            message: format!("{}{}", op.error_prefix(), detail),
        }
    }
}

fn reject(op: Operation, rejection: Rejection) -> AppError {
    warn!(
        operation = op.name(),
        kind = rejection.kind.code(),
        message = %rejection.message,
        "Request rejected"
    );
    AppError::Rejected(rejection)
}

fn char_count(text: Option<&str>) -> usize {
    text.map_or(0, |t| t.chars().count())
}
