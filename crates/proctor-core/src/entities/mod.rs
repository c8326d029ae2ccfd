//! Entity structs for all Proctor domain objects.
//!
//! `Detection` is transient input from the detection capability. `SessionRecord`
//! is the one persisted entity; it maps to the `sessions` table in the durable
//! backend and to one element of the in-process collection in fallback mode.
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON
//! roundtrip and schema validation.

mod alert;
mod detection;
mod session;

pub use alert::Alert;
pub use detection::{BoundingBox, Detection, SuspiciousFinding};
pub use session::{SessionInput, SessionRecord};
