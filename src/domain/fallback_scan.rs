//! Raw-text fallback scan.
//!
//! Last resort when no grid column produced a ticker, and the only stage
//! applied to OCR output. Looser than the column scorer: any word-bounded run
//! of capital letters qualifies unless it is a known noise word.

use crate::domain::policy::ExtractionPolicy;
use crate::domain::ticker::{dedup_preserving_order, find_uppercase_words};

/// Decode bytes as UTF-8, dropping anything that is not valid.
pub fn decode_lossy(content: &[u8]) -> String {
    String::from_utf8_lossy(content).replace(char::REPLACEMENT_CHARACTER, "")
}

pub fn scan_text(text: &str, policy: &ExtractionPolicy) -> Vec<String> {
    dedup_preserving_order(
        find_uppercase_words(text, policy.fallback_max_len)
            .into_iter()
            .filter(|word| !policy.is_fallback_ignored(word)),
    )
}
