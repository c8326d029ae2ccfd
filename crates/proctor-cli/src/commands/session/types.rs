use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SessionExportResponse {
    pub exported: usize,
    pub path: String,
}
