//! Input gates applied to untrusted résumé input before any collaborator sees it.
//!
//! Every validator walks an ordered list of named gates and stops at the first one
//! that fails. The order of each list is part of the contract: emptiness is always
//! decided before any length bound, so blank input is never reported as "too short".
//!
//! Everything here is pure apart from trace-level gate events. Callers decide what else to log.

use tracing::trace;

use crate::errors::{ErrorKind, Rejection};
use crate::models::resume::FileInput;

/// Extensions accepted for upload, compared case-insensitively.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

const MIB: usize = 1024 * 1024;

/// Tunable thresholds for every gate.
///
/// `min_extracted_chars` is a heuristic for image-only PDFs: a real text résumé
/// extracts to far more than a handful of characters, a scan extracts to almost
/// nothing. The value is a product decision, not a measured property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationLimits {
    pub max_upload_bytes: usize,
    pub min_extracted_chars: usize,
    pub min_resume_chars: usize,
    pub max_resume_chars: usize,
    pub max_job_description_chars: usize,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            max_upload_bytes: 10 * MIB,
            min_extracted_chars: 50,
            min_resume_chars: 50,
            max_resume_chars: 50_000,
            max_job_description_chars: 20_000,
        }
    }
}

impl ValidationLimits {
    pub fn resume_for_analysis(&self) -> TextPolicy {
        TextPolicy {
            min_chars: Some(self.min_resume_chars),
            max_chars: Some(self.max_resume_chars),
        }
    }

    /// The question path only enforces a minimum.
    pub fn resume_for_questions(&self) -> TextPolicy {
        TextPolicy {
            min_chars: Some(self.min_resume_chars),
            max_chars: None,
        }
    }

    pub fn job_description(&self) -> TextPolicy {
        TextPolicy {
            min_chars: None,
            max_chars: Some(self.max_job_description_chars),
        }
    }
}

/// Length bounds for one text field. `None` disables the bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextPolicy {
    /// Compared against the trimmed length.
    pub min_chars: Option<usize>,
    /// Compared against the raw, untrimmed length.
    pub max_chars: Option<usize>,
}

/// What the document parser is willing to accept. Queried, never mutated.
pub trait FileRules {
    fn is_supported_extension(&self, filename: &str) -> bool;
    fn max_allowed_bytes(&self) -> usize;
}

/// The text field being validated; selects the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSubject {
    Resume,
    ResumeForQuestions,
    JobDescription,
}

impl TextSubject {
    fn message(self, kind: ErrorKind) -> &'static str {
        match (self, kind) {
            (TextSubject::JobDescription, ErrorKind::EmptyInput) => {
                "Mô tả công việc không được để trống"
            }
            (TextSubject::JobDescription, ErrorKind::TooShort) => "Mô tả công việc quá ngắn.",
            (TextSubject::JobDescription, _) => {
                "Mô tả công việc quá dài. Vui lòng rút gọn nội dung."
            }
            (_, ErrorKind::EmptyInput) => "Text CV không được để trống",
            (TextSubject::ResumeForQuestions, ErrorKind::TooShort) => {
                "Nội dung CV quá ngắn để tạo câu hỏi phỏng vấn."
            }
            (_, ErrorKind::TooShort) => {
                "Nội dung CV quá ngắn. Vui lòng cung cấp thông tin chi tiết hơn."
            }
            (_, _) => "Nội dung CV quá dài. Vui lòng rút gọn nội dung.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Accepted { normalized_text: String },
    Rejected(Rejection),
}

impl ValidationOutcome {
    pub fn into_result(self) -> Result<String, Rejection> {
        match self {
            ValidationOutcome::Accepted { normalized_text } => Ok(normalized_text),
            ValidationOutcome::Rejected(rejection) => Err(rejection),
        }
    }

    #[cfg(test)]
    pub fn rejection_kind(&self) -> Option<ErrorKind> {
        match self {
            ValidationOutcome::Accepted { .. } => None,
            ValidationOutcome::Rejected(r) => Some(r.kind),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Gates
// ────────────────────────────────────────────────────────────────────────────

/// A named predicate. `fails` returns true when the input must be rejected with `kind`.
pub struct Gate<T: ?Sized, C: ?Sized> {
    pub name: &'static str,
    pub kind: ErrorKind,
    fails: fn(&T, &C) -> bool,
}

fn first_failure<T: ?Sized, C: ?Sized>(
    gates: &[Gate<T, C>],
    input: &T,
    ctx: &C,
) -> Option<ErrorKind> {
    gates
        .iter()
        .find(|gate| (gate.fails)(input, ctx))
        .inspect(|gate| trace!(gate = gate.name, kind = gate.kind.code(), "Gate failed"))
        .map(|gate| gate.kind)
}

/// Upload gates, generic over the rules so a `dyn DocumentParser` can be passed directly.
pub fn file_gates<R: FileRules + ?Sized>() -> [Gate<FileInput, R>; 3] {
    [
        Gate {
            name: "file_not_empty",
            kind: ErrorKind::EmptyInput,
            fails: file_is_empty::<R>,
        },
        Gate {
            name: "extension_supported",
            kind: ErrorKind::UnsupportedFormat,
            fails: file_extension_unsupported::<R>,
        },
        Gate {
            name: "within_size_cap",
            kind: ErrorKind::TooLarge,
            fails: file_too_large::<R>,
        },
    ]
}

pub const EXTRACTED_TEXT_GATES: &[Gate<str, ValidationLimits>] = &[
    Gate {
        name: "extraction_not_empty",
        kind: ErrorKind::EmptyExtraction,
        fails: text_is_blank_for_extraction,
    },
    Gate {
        name: "not_likely_scanned",
        kind: ErrorKind::LikelyScanned,
        fails: extraction_looks_scanned,
    },
];

pub const RAW_TEXT_GATES: &[Gate<str, TextPolicy>] = &[
    Gate {
        name: "text_not_empty",
        kind: ErrorKind::EmptyInput,
        fails: text_is_blank,
    },
    Gate {
        name: "meets_minimum_length",
        kind: ErrorKind::TooShort,
        fails: text_below_minimum,
    },
    Gate {
        name: "within_maximum_length",
        kind: ErrorKind::TooLong,
        fails: text_above_maximum,
    },
];

fn file_is_empty<R: FileRules + ?Sized>(file: &FileInput, _: &R) -> bool {
    file.is_empty()
}

fn file_extension_unsupported<R: FileRules + ?Sized>(file: &FileInput, rules: &R) -> bool {
    !rules.is_supported_extension(file.filename())
}

fn file_too_large<R: FileRules + ?Sized>(file: &FileInput, rules: &R) -> bool {
    file.bytes.len() > rules.max_allowed_bytes()
}

fn text_is_blank_for_extraction(text: &str, _: &ValidationLimits) -> bool {
    text.trim().is_empty()
}

fn extraction_looks_scanned(text: &str, limits: &ValidationLimits) -> bool {
    char_len(text.trim()) < limits.min_extracted_chars
}

fn text_is_blank(text: &str, _: &TextPolicy) -> bool {
    text.trim().is_empty()
}

fn text_below_minimum(text: &str, policy: &TextPolicy) -> bool {
    policy
        .min_chars
        .is_some_and(|min| char_len(text.trim()) < min)
}

fn text_above_maximum(text: &str, policy: &TextPolicy) -> bool {
    policy.max_chars.is_some_and(|max| char_len(text) > max)
}

// ────────────────────────────────────────────────────────────────────────────
// Validators
// ────────────────────────────────────────────────────────────────────────────

/// Checks an upload's emptiness, extension and size. Never reads the content.
pub fn validate_file<R: FileRules + ?Sized>(file: &FileInput, rules: &R) -> ValidationOutcome {
    match first_failure(&file_gates::<R>(), file, rules) {
        None => ValidationOutcome::Accepted {
            normalized_text: String::new(),
        },
        Some(kind) => {
            let message = match kind {
                ErrorKind::EmptyInput => "File không được để trống".to_string(),
                ErrorKind::UnsupportedFormat => "Chỉ hỗ trợ file PDF, DOC, DOCX".to_string(),
                _ => too_large_message(rules.max_allowed_bytes()),
            };
            ValidationOutcome::Rejected(Rejection::new(kind, message))
        }
    }
}

/// The `TooLarge` message for a cap of `max_bytes`. Also used when the transport
/// refuses a body before the size gate runs.
pub fn too_large_message(max_bytes: usize) -> String {
    format!("File quá lớn (tối đa {}MB)", format_megabytes(max_bytes))
}

/// Re-validates parser output. Accepted text is trimmed.
pub fn validate_extracted_text(text: &str, limits: &ValidationLimits) -> ValidationOutcome {
    match first_failure(EXTRACTED_TEXT_GATES, text, limits) {
        None => ValidationOutcome::Accepted {
            normalized_text: text.trim().to_string(),
        },
        Some(ErrorKind::EmptyExtraction) => ValidationOutcome::Rejected(Rejection::new(
            ErrorKind::EmptyExtraction,
            "Không thể trích xuất text từ file. File có thể là PDF dạng scan hoặc không chứa text.",
        )),
        Some(kind) => ValidationOutcome::Rejected(Rejection::new(
            kind,
            "Nội dung text quá ngắn. File có thể là PDF dạng scan chứ không phải dạng text. \
             Điều này có thể bị loại bởi hệ thống lọc CV tự động. \
             Vui lòng chuyển CV thành dạng text trước khi upload.",
        )),
    }
}

/// Validates pasted text. Accepted text is passed through untrimmed so the
/// provider sees the user's original formatting.
pub fn validate_raw_text(
    text: Option<&str>,
    subject: TextSubject,
    policy: &TextPolicy,
) -> ValidationOutcome {
    let text = text.unwrap_or_default();
    match first_failure(RAW_TEXT_GATES, text, policy) {
        None => ValidationOutcome::Accepted {
            normalized_text: text.to_string(),
        },
        Some(kind) => ValidationOutcome::Rejected(Rejection::new(kind, subject.message(kind))),
    }
}

/// Maps every "no job description" spelling to `None`: JSON null, blank strings,
/// and the literal `"null"` some clients send. Idempotent.
pub fn normalize_job_description(raw: Option<String>) -> Option<String> {
    raw.filter(|jd| {
        let trimmed = jd.trim();
        !trimmed.is_empty() && !trimmed.eq_ignore_ascii_case("null")
    })
}

/// Lowercased substring after the last `.`, if there is one.
pub fn file_extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}

pub fn has_supported_extension(filename: &str) -> bool {
    file_extension(filename).is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn format_megabytes(bytes: usize) -> String {
    if bytes % MIB == 0 {
        (bytes / MIB).to_string()
    } else {
        format!("{:.1}", bytes as f64 / MIB as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    struct Rules {
        max_bytes: usize,
    }

    impl FileRules for Rules {
        fn is_supported_extension(&self, filename: &str) -> bool {
            has_supported_extension(filename)
        }

        fn max_allowed_bytes(&self) -> usize {
            self.max_bytes
        }
    }

    fn rules() -> Rules {
        Rules {
            max_bytes: ValidationLimits::default().max_upload_bytes,
        }
    }

    fn file(name: &str, len: usize) -> FileInput {
        FileInput::new(Some(name.to_string()), Bytes::from(vec![b'x'; len]))
    }

    fn text_of(len: usize) -> String {
        "a".repeat(len)
    }

    fn analysis_policy() -> TextPolicy {
        ValidationLimits::default().resume_for_analysis()
    }

    // ── file gates ──────────────────────────────────────────────────────────

    #[test]
    fn test_empty_file_is_empty_input() {
        let outcome = validate_file(&file("cv.pdf", 0), &rules());
        assert_eq!(outcome.rejection_kind(), Some(ErrorKind::EmptyInput));
        assert_eq!(
            outcome.into_result().unwrap_err().message,
            "File không được để trống"
        );
    }

    #[test]
    fn test_empty_file_with_bad_extension_is_still_empty_input() {
        let outcome = validate_file(&file("cv.exe", 0), &rules());
        assert_eq!(outcome.rejection_kind(), Some(ErrorKind::EmptyInput));
    }

    #[test]
    fn test_supported_extensions_any_case() {
        for name in ["cv.pdf", "cv.PDF", "cv.Doc", "cv.DOCX", "my.final.cv.docx"] {
            assert_eq!(validate_file(&file(name, 10), &rules()).rejection_kind(), None, "{name}");
        }
    }

    #[test]
    fn test_unsupported_extensions() {
        for name in ["cv.txt", "cv.pdf.exe", "cv", "pdf", "cv.", "", "cv.docxx"] {
            assert_eq!(
                validate_file(&file(name, 10), &rules()).rejection_kind(),
                Some(ErrorKind::UnsupportedFormat),
                "{name}"
            );
        }
    }

    #[test]
    fn test_missing_filename_is_unsupported() {
        let f = FileInput::new(None, Bytes::from_static(b"%PDF-1.7"));
        assert_eq!(
            validate_file(&f, &rules()).rejection_kind(),
            Some(ErrorKind::UnsupportedFormat)
        );
    }

    #[test]
    fn test_size_cap_is_inclusive() {
        let cap = rules().max_bytes;
        assert_eq!(validate_file(&file("cv.pdf", cap), &rules()).rejection_kind(), None);
        let outcome = validate_file(&file("cv.pdf", cap + 1), &rules());
        assert_eq!(outcome.rejection_kind(), Some(ErrorKind::TooLarge));
        assert_eq!(
            outcome.into_result().unwrap_err().message,
            "File quá lớn (tối đa 10MB)"
        );
    }

    #[test]
    fn test_too_large_message_follows_configured_cap() {
        let small = Rules { max_bytes: MIB / 2 };
        let outcome = validate_file(&file("cv.pdf", MIB), &small);
        assert_eq!(
            outcome.into_result().unwrap_err().message,
            "File quá lớn (tối đa 0.5MB)"
        );
    }

    #[test]
    fn test_unsupported_checked_before_size() {
        let outcome = validate_file(&file("cv.png", rules().max_bytes + 1), &rules());
        assert_eq!(outcome.rejection_kind(), Some(ErrorKind::UnsupportedFormat));
    }

    #[test]
    fn test_file_gate_order() {
        let names: Vec<_> = file_gates::<Rules>().iter().map(|g| g.kind).collect();
        assert_eq!(
            names,
            vec![
                ErrorKind::EmptyInput,
                ErrorKind::UnsupportedFormat,
                ErrorKind::TooLarge
            ]
        );
    }

    // ── extracted text gates ────────────────────────────────────────────────

    #[test]
    fn test_blank_extraction() {
        let limits = ValidationLimits::default();
        for text in ["", "   ", "\n\t\r\n"] {
            assert_eq!(
                validate_extracted_text(text, &limits).rejection_kind(),
                Some(ErrorKind::EmptyExtraction)
            );
        }
    }

    #[test]
    fn test_short_extraction_is_likely_scanned() {
        let limits = ValidationLimits::default();
        let text = format!("  {}  ", text_of(49));
        assert_eq!(
            validate_extracted_text(&text, &limits).rejection_kind(),
            Some(ErrorKind::LikelyScanned)
        );
    }

    #[test]
    fn test_extraction_at_threshold_is_trimmed() {
        let limits = ValidationLimits::default();
        let text = format!("\n\n{}\n", text_of(50));
        assert_eq!(
            validate_extracted_text(&text, &limits).into_result().unwrap(),
            text_of(50)
        );
    }

    #[test]
    fn test_scan_threshold_is_tunable() {
        let limits = ValidationLimits {
            min_extracted_chars: 10,
            ..ValidationLimits::default()
        };
        assert_eq!(validate_extracted_text(&text_of(10), &limits).rejection_kind(), None);
        assert_eq!(
            validate_extracted_text(&text_of(9), &limits).rejection_kind(),
            Some(ErrorKind::LikelyScanned)
        );
    }

    // ── raw text gates ──────────────────────────────────────────────────────

    #[test]
    fn test_blank_text_is_empty_never_too_short() {
        for text in [None, Some(""), Some(" "), Some("\n\t  \n")] {
            let outcome = validate_raw_text(text, TextSubject::Resume, &analysis_policy());
            assert_eq!(outcome.rejection_kind(), Some(ErrorKind::EmptyInput), "{text:?}");
            assert_eq!(
                outcome.into_result().unwrap_err().message,
                "Text CV không được để trống"
            );
        }
    }

    #[test]
    fn test_trimmed_length_1_to_49_is_too_short() {
        for len in [1, 25, 49] {
            let text = format!("   {}   ", text_of(len));
            assert_eq!(
                validate_raw_text(Some(&text), TextSubject::Resume, &analysis_policy())
                    .rejection_kind(),
                Some(ErrorKind::TooShort),
                "len={len}"
            );
        }
    }

    #[test]
    fn test_padding_does_not_count_toward_minimum() {
        let text = format!("{}{}", " ".repeat(100), text_of(49));
        assert_eq!(
            validate_raw_text(Some(&text), TextSubject::Resume, &analysis_policy())
                .rejection_kind(),
            Some(ErrorKind::TooShort)
        );
    }

    #[test]
    fn test_accepted_text_is_passed_through_untrimmed() {
        let text = format!("  {}\n", text_of(50));
        let accepted = validate_raw_text(Some(&text), TextSubject::Resume, &analysis_policy())
            .into_result()
            .unwrap();
        assert_eq!(accepted, text);
    }

    #[test]
    fn test_maximum_counts_raw_length() {
        let policy = analysis_policy();
        let at_cap = text_of(50_000);
        assert_eq!(
            validate_raw_text(Some(&at_cap), TextSubject::Resume, &policy).rejection_kind(),
            None
        );

        // Trimmed content fits but the raw string does not.
        let padded = format!("{} ", at_cap);
        let outcome = validate_raw_text(Some(&padded), TextSubject::Resume, &policy);
        assert_eq!(outcome.rejection_kind(), Some(ErrorKind::TooLong));
        assert_eq!(
            outcome.into_result().unwrap_err().message,
            "Nội dung CV quá dài. Vui lòng rút gọn nội dung."
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 50 Vietnamese characters, well over 50 bytes.
        let text = "ệ".repeat(50);
        assert_eq!(
            validate_raw_text(Some(&text), TextSubject::Resume, &analysis_policy())
                .rejection_kind(),
            None
        );
        let text = "ệ".repeat(49);
        assert_eq!(
            validate_raw_text(Some(&text), TextSubject::Resume, &analysis_policy())
                .rejection_kind(),
            Some(ErrorKind::TooShort)
        );
    }

    #[test]
    fn test_questions_path_has_no_upper_bound() {
        let policy = ValidationLimits::default().resume_for_questions();
        let huge = text_of(200_000);
        assert_eq!(
            validate_raw_text(Some(&huge), TextSubject::ResumeForQuestions, &policy)
                .rejection_kind(),
            None
        );
    }

    #[test]
    fn test_questions_path_short_message() {
        let policy = ValidationLimits::default().resume_for_questions();
        let outcome = validate_raw_text(Some(&text_of(49)), TextSubject::ResumeForQuestions, &policy);
        assert_eq!(
            outcome.into_result().unwrap_err().message,
            "Nội dung CV quá ngắn để tạo câu hỏi phỏng vấn."
        );
    }

    #[test]
    fn test_job_description_bound() {
        let policy = ValidationLimits::default().job_description();
        assert_eq!(
            validate_raw_text(Some(&text_of(20_000)), TextSubject::JobDescription, &policy)
                .rejection_kind(),
            None
        );
        let outcome =
            validate_raw_text(Some(&text_of(20_001)), TextSubject::JobDescription, &policy);
        assert_eq!(outcome.rejection_kind(), Some(ErrorKind::TooLong));
        assert_eq!(
            outcome.into_result().unwrap_err().message,
            "Mô tả công việc quá dài. Vui lòng rút gọn nội dung."
        );
    }

    #[test]
    fn test_short_job_description_is_fine() {
        let policy = ValidationLimits::default().job_description();
        assert_eq!(
            validate_raw_text(Some("Rust"), TextSubject::JobDescription, &policy)
                .rejection_kind(),
            None
        );
    }

    #[test]
    fn test_raw_text_gate_order() {
        let names: Vec<_> = RAW_TEXT_GATES.iter().map(|g| g.name).collect();
        assert_eq!(
            names,
            vec!["text_not_empty", "meets_minimum_length", "within_maximum_length"]
        );
    }

    // ── job description normalization ───────────────────────────────────────

    #[test]
    fn test_normalize_absent_spellings() {
        for raw in [None, Some(""), Some("   "), Some("null"), Some("NULL"), Some(" Null ")] {
            assert_eq!(normalize_job_description(raw.map(String::from)), None, "{raw:?}");
        }
    }

    #[test]
    fn test_normalize_keeps_real_text_verbatim() {
        let jd = Some("  Senior Rust Engineer\n".to_string());
        assert_eq!(normalize_job_description(jd.clone()), jd);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in [None, Some("null"), Some(" "), Some("Backend developer")] {
            let once = normalize_job_description(raw.map(String::from));
            let twice = normalize_job_description(once.clone());
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_nullable_word_inside_text_is_kept() {
        let jd = Some("Experience with nullable types".to_string());
        assert_eq!(normalize_job_description(jd.clone()), jd);
    }

    // ── helpers ─────────────────────────────────────────────────────────────

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("cv.PDF").as_deref(), Some("pdf"));
        assert_eq!(file_extension("a.b.docx").as_deref(), Some("docx"));
        assert_eq!(file_extension("noext"), None);
        assert_eq!(file_extension("trailing."), None);
    }

    #[test]
    fn test_extension_is_not_trimmed() {
        assert_eq!(file_extension("cv.pdf ").as_deref(), Some("pdf "));
        assert!(!has_supported_extension("cv.pdf "));
        assert!(!has_supported_extension("cv. docx"));
    }

    #[test]
    fn test_too_large_message_matches_size_gate() {
        assert_eq!(too_large_message(10 * MIB), "File quá lớn (tối đa 10MB)");
        assert_eq!(too_large_message(MIB / 2), "File quá lớn (tối đa 0.5MB)");
    }
}
