use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Axis-aligned box in frame pixels, serialized as `[x, y, width, height]`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct BoundingBox(pub [f64; 4]);

impl BoundingBox {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self([x, y, width, height])
    }

    #[must_use]
    pub const fn x(&self) -> f64 {
        self.0[0]
    }

    #[must_use]
    pub const fn y(&self) -> f64 {
        self.0[1]
    }

    #[must_use]
    pub const fn width(&self) -> f64 {
        self.0[2]
    }

    #[must_use]
    pub const fn height(&self) -> f64 {
        self.0[3]
    }
}

/// One labeled, confidence-scored bounding box reported by the detection capability.
///
/// Field names follow the detector's wire shape (`class`, `score`, `bbox`);
/// `classLabel`, `confidence` and `boundingBox` are accepted as aliases.
/// A missing or non-string label deserializes to `None`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Detection {
    #[serde(
        rename = "class",
        alias = "classLabel",
        default,
        deserialize_with = "lenient_label"
    )]
    pub class_label: Option<String>,
    #[serde(rename = "score", alias = "confidence", default)]
    pub confidence: f64,
    #[serde(rename = "bbox", alias = "boundingBox", default)]
    pub bounding_box: BoundingBox,
}

impl Detection {
    #[must_use]
    pub fn new(class_label: impl Into<String>, confidence: f64, bounding_box: BoundingBox) -> Self {
        Self {
            class_label: Some(class_label.into()),
            confidence,
            bounding_box,
        }
    }
}

/// A detection whose label matched one of the suspicious-object keywords.
///
/// Clients may submit bare detector predictions; those deserialize with an
/// empty `keyword` and serialize back without one.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SuspiciousFinding {
    #[serde(flatten)]
    pub detection: Detection,
    /// The keyword that matched, lowercase. Empty when the client did not say.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub keyword: String,
}

impl SuspiciousFinding {
    /// Drop the match annotation and recover the original detection.
    #[must_use]
    pub fn into_detection(self) -> Detection {
        self.detection
    }
}

fn lenient_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_str().map(str::to_owned)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserializes_detector_wire_shape() {
        let det: Detection = serde_json::from_value(serde_json::json!({
            "class": "cell phone",
            "score": 0.87,
            "bbox": [10.0, 20.0, 30.0, 40.0]
        }))
        .unwrap();
        assert_eq!(det.class_label.as_deref(), Some("cell phone"));
        assert!((det.confidence - 0.87).abs() < f64::EPSILON);
        assert_eq!(det.bounding_box, BoundingBox::new(10.0, 20.0, 30.0, 40.0));
    }

    #[test]
    fn accepts_long_field_aliases() {
        let det: Detection = serde_json::from_value(serde_json::json!({
            "classLabel": "book",
            "confidence": 0.5,
            "boundingBox": [1.0, 2.0, 3.0, 4.0]
        }))
        .unwrap();
        assert_eq!(det.class_label.as_deref(), Some("book"));
        assert!((det.bounding_box.height() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_or_malformed_label_is_none() {
        let missing: Detection =
            serde_json::from_value(serde_json::json!({ "score": 0.4 })).unwrap();
        assert_eq!(missing.class_label, None);

        let numeric: Detection =
            serde_json::from_value(serde_json::json!({ "class": 42, "score": 0.4 })).unwrap();
        assert_eq!(numeric.class_label, None);

        let null: Detection =
            serde_json::from_value(serde_json::json!({ "class": null })).unwrap();
        assert_eq!(null.class_label, None);
    }

    #[test]
    fn finding_serializes_flat() {
        let finding = SuspiciousFinding {
            detection: Detection::new("laptop", 0.9, BoundingBox::new(0.0, 0.0, 5.0, 5.0)),
            keyword: "laptop".into(),
        };
        let json = serde_json::to_value(&finding).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "class": "laptop",
                "score": 0.9,
                "bbox": [0.0, 0.0, 5.0, 5.0],
                "keyword": "laptop"
            })
        );
        let back: SuspiciousFinding = serde_json::from_value(json).unwrap();
        assert_eq!(back, finding);
    }

    #[test]
    fn bare_prediction_reads_as_finding() {
        let raw = serde_json::json!({
            "class": "cell phone",
            "score": 0.9,
            "bbox": [1.0, 2.0, 3.0, 4.0]
        });
        let finding: SuspiciousFinding = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(finding.detection.class_label.as_deref(), Some("cell phone"));
        assert!(finding.keyword.is_empty());
        assert_eq!(serde_json::to_value(&finding).unwrap(), raw);
    }
}
