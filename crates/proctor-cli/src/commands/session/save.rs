use std::path::Path;

use proctor_core::entities::SessionInput;
use proctor_core::enums::StoreMode;

use crate::cli::GlobalFlags;
use crate::commands::shared::read_json;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(input: &Path, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session: SessionInput = read_json(input)?;
    let created = ctx.repository.create_session(session).await?;

    if ctx.repository.mode() == StoreMode::Fallback && !flags.quiet {
        eprintln!(
            "warning: no durable backend; session {} is held in memory and is lost when this command exits",
            created.id
        );
    }

    output(&created, flags.format)
}
