// LLM prompt templates for résumé analysis and interview question generation.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::{
    JSON_ONLY_SYSTEM, UNTRUSTED_INPUT_INSTRUCTION, VIETNAMESE_OUTPUT_INSTRUCTION,
};

/// Role preamble for résumé review.
const ANALYSIS_ROLE: &str = "You are a senior technical recruiter and résumé coach. \
    You review résumés the way applicant tracking systems and hiring managers do.";

/// Role preamble for interview preparation.
const INTERVIEWER_ROLE: &str = "You are an experienced hiring manager preparing a \
    structured interview for the candidate whose résumé you are given.";

/// Résumé analysis prompt. Replace `{resume_text}` and `{job_description_block}` before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the résumé below.

Return a JSON object with this EXACT schema (no extra fields):
{
  "overall_score": 72,
  "summary": "Two or three sentences on the résumé as a whole.",
  "strengths": ["Concrete strength grounded in the résumé"],
  "improvements": ["Concrete, actionable improvement"],
  "kinh_nghiem_lam_viec": {
    "noi_dung": "What the work experience section currently says",
    "de_xuat": "Rewritten or improved version",
    "ly_do": "Why the change helps"
  },
  "hoc_van": {
    "noi_dung": "...",
    "de_xuat": "...",
    "ly_do": "..."
  },
  "ky_nang": {
    "noi_dung": "...",
    "de_xuat": "...",
    "ly_do": "..."
  },
  "job_match": null
}

Rules:
- overall_score is an integer from 0 to 100.
- If a job description is provided, set "job_match" to
  {"score": <0-100>, "matched_skills": [...], "missing_skills": [...], "analysis": "..."}
  and tailor improvements to that role. Otherwise keep "job_match" null.
- Base every statement on the résumé text. Do not invent employers, dates or numbers.

RÉSUMÉ:
"""
{resume_text}
"""
{job_description_block}"#;

/// Interview question prompt. Replace `{resume_text}` and `{job_description_block}` before sending.
pub const QUESTIONS_PROMPT_TEMPLATE: &str = r#"Prepare interview questions for this candidate.

Return a JSON object with this EXACT schema (no extra fields):
{
  "questions": [
    {"question": "Question text", "expectedDuration": 120}
  ]
}

Rules:
- Between 5 and 10 questions, ordered from warm-up to most demanding.
- Mix behavioral questions with technical questions drawn from the résumé's projects and skills.
- expectedDuration is the suggested answer time in seconds (60 to 300).
- If a job description is provided, probe the gaps between the résumé and that role.

RÉSUMÉ:
"""
{resume_text}
"""
{job_description_block}"#;

pub fn analysis_system() -> String {
    system_prompt(ANALYSIS_ROLE)
}

pub fn questions_system() -> String {
    system_prompt(INTERVIEWER_ROLE)
}

fn system_prompt(role: &str) -> String {
    format!("{role} {JSON_ONLY_SYSTEM} {VIETNAMESE_OUTPUT_INSTRUCTION} {UNTRUSTED_INPUT_INSTRUCTION}")
}

pub fn render(template: &str, resume_text: &str, job_description: Option<&str>) -> String {
    let jd_block = match job_description {
        Some(jd) => format!("\nJOB DESCRIPTION:\n\"\"\"\n{jd}\n\"\"\"\n"),
        None => "\nNo job description was provided.\n".to_string(),
    };
    // Job description first: the résumé may itself contain the placeholder text.
    template
        .replace("{job_description_block}", &jd_block)
        .replacen("{resume_text}", resume_text, 1)
}
