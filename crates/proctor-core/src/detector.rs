//! Boundary to the object-detection capability.
//!
//! The model itself (loading, inference) lives outside this workspace. Callers
//! plug it in through [`DetectionSource`] and use [`scan_frame`] to get the
//! suspicious findings for one video frame.

use std::future::Future;

use thiserror::Error;

use crate::classifier::SuspiciousActivityClassifier;
use crate::entities::{Detection, SuspiciousFinding};

/// Errors reported by a detection source.
#[derive(Debug, Error)]
pub enum DetectError {
    /// The model failed to run on the frame.
    #[error("Detection failed: {0}")]
    Inference(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// An object detector that turns a frame into labeled bounding boxes.
pub trait DetectionSource {
    /// Frame representation the detector consumes.
    type Frame: ?Sized;

    /// Whether the model is loaded and can accept frames.
    fn ready(&self) -> bool;

    /// Run detection on one frame.
    fn detect(
        &self,
        frame: &Self::Frame,
    ) -> impl Future<Output = Result<Vec<Detection>, DetectError>> + Send;
}

/// Detect and classify one frame.
///
/// Returns an empty list without calling the detector when it is not ready,
/// and an empty list (logged) when detection fails. A failed frame never
/// interrupts monitoring.
pub async fn scan_frame<S>(
    source: &S,
    classifier: &SuspiciousActivityClassifier,
    frame: &S::Frame,
) -> Vec<SuspiciousFinding>
where
    S: DetectionSource + Sync,
{
    if !source.ready() {
        tracing::debug!("detection source not ready; skipping frame");
        return Vec::new();
    }

    match source.detect(frame).await {
        Ok(detections) => classifier.classify(&detections),
        Err(error) => {
            tracing::warn!(%error, "detection failed; frame skipped");
            Vec::new()
        }
    }
}
