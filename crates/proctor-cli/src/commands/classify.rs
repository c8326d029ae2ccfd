use proctor_config::ProctorConfig;
use proctor_core::classifier::SuspiciousActivityClassifier;
use proctor_core::entities::{Detection, SuspiciousFinding};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ClassifyArgs;
use crate::commands::shared::read_json;
use crate::output::output;

/// Handle `proctor classify`.
pub fn handle(
    args: &ClassifyArgs,
    config: &ProctorConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let detections: Vec<Detection> = read_json(&args.input)?;
    let findings = classify(&detections, &args.keywords, config);
    tracing::debug!(
        detections = detections.len(),
        findings = findings.len(),
        "frame classified"
    );
    output(&findings, flags.format)
}

fn classify(
    detections: &[Detection],
    keywords: &[String],
    config: &ProctorConfig,
) -> Vec<SuspiciousFinding> {
    let classifier = if keywords.is_empty() {
        config.classifier.build()
    } else {
        SuspiciousActivityClassifier::with_keywords(keywords)
    };
    classifier.classify(detections)
}
