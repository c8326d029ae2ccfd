use std::path::Path;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

use super::types::SessionExportResponse;

pub async fn run(path: &Path, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let exported = ctx.repository.export_jsonl(path).await?;
    output(
        &SessionExportResponse {
            exported,
            path: path.display().to_string(),
        },
        flags.format,
    )
}
