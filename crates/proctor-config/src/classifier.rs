//! Suspicious-activity classifier configuration.

use proctor_core::classifier::{SUSPICIOUS_KEYWORDS, SuspiciousActivityClassifier};
use serde::{Deserialize, Serialize};

fn default_keywords() -> Vec<String> {
    SUSPICIOUS_KEYWORDS.iter().map(|k| (*k).to_string()).collect()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClassifierConfig {
    /// Label keywords that mark a detection as suspicious, in priority order.
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            keywords: default_keywords(),
        }
    }
}

impl ClassifierConfig {
    /// Build the classifier this configuration describes.
    pub fn build(&self) -> SuspiciousActivityClassifier {
        SuspiciousActivityClassifier::with_keywords(&self.keywords)
    }
}
