use super::ParseError;

/// Extracts the text layer of an in-memory PDF.
///
/// Image-only (scanned) PDFs succeed here with little or no text; the pipeline's
/// post-extraction gates are what reject them.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ParseError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| ParseError::Pdf(e.to_string()))
}
