use std::path::Path;

use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(path: &Path, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.config
        .require_backend()
        .context("session import writes to the durable backend; set PROCTOR_BACKEND__URL or PROCTOR_BACKEND__PATH")?;

    let summary = ctx.repository.import_jsonl(path).await?;
    output(&summary, flags.format)
}
