mod export;
mod get;
mod import;
mod list;
mod save;
mod types;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SessionCommands;
use crate::context::AppContext;

/// Handle `proctor session`.
pub async fn handle(
    action: &SessionCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        SessionCommands::Save { input } => save::run(input, ctx, flags).await,
        SessionCommands::List => list::run(ctx, flags).await,
        SessionCommands::Get { id } => get::run(id, ctx, flags).await,
        SessionCommands::Export { output } => export::run(output, ctx, flags).await,
        SessionCommands::Import { input } => import::run(input, ctx, flags).await,
    }
}
