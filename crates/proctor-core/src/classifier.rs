//! Suspicious-activity classification.
//!
//! Turns raw object-detection predictions into the subset that indicates a
//! candidate may be using forbidden material. A detection is suspicious when its
//! label contains one of the configured keywords, compared case-insensitively as
//! a substring (`"Laptop computer"` matches `"laptop"`).

use crate::entities::{Detection, SuspiciousFinding};

/// Default keyword set, in match-priority order.
pub const SUSPICIOUS_KEYWORDS: [&str; 5] = ["cell phone", "book", "laptop", "mouse", "keyboard"];

/// Stateless filter over detections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuspiciousActivityClassifier {
    keywords: Vec<String>,
}

impl Default for SuspiciousActivityClassifier {
    fn default() -> Self {
        Self::with_keywords(SUSPICIOUS_KEYWORDS)
    }
}

impl SuspiciousActivityClassifier {
    /// Build a classifier from a keyword list.
    ///
    /// Keywords are trimmed and lowercased; blank entries are dropped. An empty
    /// list yields a classifier that matches nothing.
    pub fn with_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// First keyword contained in `label`, if any.
    #[must_use]
    pub fn matched_keyword(&self, label: &str) -> Option<&str> {
        let label = label.to_lowercase();
        self.keywords
            .iter()
            .find(|k| label.contains(k.as_str()))
            .map(String::as_str)
    }

    /// Keep the suspicious detections, in input order.
    ///
    /// Detections without a label never match.
    #[must_use]
    pub fn classify(&self, detections: &[Detection]) -> Vec<SuspiciousFinding> {
        detections
            .iter()
            .filter_map(|det| {
                let keyword = self.matched_keyword(det.class_label.as_deref()?)?;
                Some(SuspiciousFinding {
                    detection: det.clone(),
                    keyword: keyword.to_string(),
                })
            })
            .collect()
    }
}
