//! Axum route handlers for the Résumé API.

use axum::{
    extract::{multipart::MultipartRejection, rejection::JsonRejection, Multipart, State},
    Json,
};

use crate::errors::AppError;
use crate::models::envelope::{Data, Envelope};
use crate::models::resume::{
    AnalysisResult, AnalyzeTextBody, InterviewQuestion, InterviewQuestionsBody, TextInput,
    UploadedResume,
};
use crate::resume::upload::read_resume_file;
use crate::state::AppState;

pub const UPLOAD_SUCCESS: &str = "Trích xuất text thành công";
pub const ANALYSIS_SUCCESS: &str = "Phân tích CV thành công";
pub const QUESTIONS_SUCCESS: &str = "Tạo câu hỏi phỏng vấn thành công";

/// POST /resume/upload
///
/// Extracts text from an uploaded PDF/DOC/DOCX so the user can review it.
/// Does not analyze anything.
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Envelope<UploadedResume>>, AppError> {
    let multipart = multipart.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let file = read_resume_file(multipart, state.pipeline.max_upload_bytes()).await?;

    let uploaded = state.pipeline.handle_upload(file).await?;

    Ok(Json(Envelope::ok(UPLOAD_SUCCESS, uploaded)))
}

/// POST /resume/analyze-text
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    body: Result<Json<AnalyzeTextBody>, JsonRejection>,
) -> Result<Json<Envelope<Data<AnalysisResult>>>, AppError> {
    let Json(body) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let analysis = state
        .pipeline
        .handle_analyze_text(TextInput { content: body.text }, body.job_description)
        .await?;

    Ok(Json(Envelope::with_data(ANALYSIS_SUCCESS, analysis)))
}

/// POST /resume/generate-interview-questions
pub async fn handle_generate_interview_questions(
    State(state): State<AppState>,
    body: Result<Json<InterviewQuestionsBody>, JsonRejection>,
) -> Result<Json<Envelope<Data<Vec<InterviewQuestion>>>>, AppError> {
    let Json(body) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let questions = state
        .pipeline
        .handle_generate_interview_questions(
            TextInput {
                content: body.resume_text,
            },
            body.job_description,
        )
        .await?;

    Ok(Json(Envelope::with_data(QUESTIONS_SUCCESS, questions)))
}
