//! Best-effort text recovery for Word 97–2003 (`.doc`) files.
//!
//! The binary format stores body text in the `WordDocument` stream either as UTF-16LE
//! or as 8-bit text. Rather than walking the piece table, we scan the whole compound
//! file for printable runs in both encodings and keep whichever encoding yields more
//! letters. Formatting is lost; the words survive, which is all the analysis needs.

use super::{ParseError, OLE_MAGIC};

/// Shorter runs are almost always structure noise.
const MIN_RUN_CHARS: usize = 4;

/// Names of compound-file streams, stored in UTF-16 in the directory sectors.
const OLE_STREAM_NAMES: &[&str] = &[
    "Root Entry",
    "WordDocument",
    "0Table",
    "1Table",
    "Data",
    "CompObj",
    "ObjectPool",
    "SummaryInformation",
    "DocumentSummaryInformation",
];

pub fn extract_doc_text(bytes: &[u8]) -> Result<String, ParseError> {
    if !bytes.starts_with(OLE_MAGIC) {
        return Err(ParseError::Doc(
            "missing OLE2 compound file header".to_string(),
        ));
    }

    let wide = collect_runs(
        bytes
            .chunks_exact(2)
            .map(|pair| char::from_u32(u16::from_le_bytes([pair[0], pair[1]]) as u32)),
    );
    let narrow = collect_runs(bytes.iter().map(|&b| b.is_ascii().then_some(b as char)));

    if letter_count(&wide) >= letter_count(&narrow) {
        Ok(wide)
    } else {
        Ok(narrow)
    }
}

fn collect_runs(chars: impl Iterator<Item = Option<char>>) -> String {
    let mut runs: Vec<String> = Vec::new();
    let mut current = String::new();

    for c in chars {
        match c.and_then(normalize_text_char) {
            Some(c) => current.push(c),
            None => flush_run(&mut current, &mut runs),
        }
    }
    flush_run(&mut current, &mut runs);

    runs.join("\n")
}

fn flush_run(current: &mut String, runs: &mut Vec<String>) {
    let run = current.trim();
    let keep = run.chars().count() >= MIN_RUN_CHARS
        && run.chars().any(char::is_alphabetic)
        && !OLE_STREAM_NAMES.contains(&run);
    if keep {
        runs.push(run.to_string());
    }
    current.clear();
}

/// Word marks paragraph ends with `\r`.
fn normalize_text_char(c: char) -> Option<char> {
    match c {
        '\r' | '\n' | '\u{0B}' => Some('\n'),
        '\t' | ' ' => Some(c),
        '–' | '—' | '•' | '‘' | '’' | '“' | '”' | '…' => Some(c),
        c if c.is_alphanumeric() || c.is_ascii_punctuation() => Some(c),
        _ => None,
    }
}

fn letter_count(text: &str) -> usize {
    text.chars().filter(|c| c.is_alphabetic()).count()
}
