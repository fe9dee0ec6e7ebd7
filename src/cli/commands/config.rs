use crate::cli::ConfigAction;
use crate::cli::context::{self, AppContext};
use crate::cli::output;
use crate::config::app_config;
use crate::core::errors::Result;

/// Execute the `worklog config` command.
///
/// Never opens the database, so it works even when the configured
/// path is unusable.
pub fn execute(action: &ConfigAction, ctx: &AppContext) -> Result<()> {
    match action {
        ConfigAction::Show => execute_show(ctx),
        ConfigAction::SetDbPath { path } => execute_set_db_path(ctx, path),
        ConfigAction::ResetDbPath => execute_reset_db_path(ctx),
    }
}

fn execute_show(ctx: &AppContext) -> Result<()> {
    let default_db = app_config::default_db_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "(unavailable)".to_string());

    output::header("worklog configuration");
    output::field("Config file", &ctx.config_path.display().to_string());
    output::field("Database", &ctx.db_path.display().to_string());
    output::field(
        "Custom db_path",
        ctx.config.storage.db_path.as_deref().unwrap_or("(not set)"),
    );
    output::field("Default db_path", &default_db);
    output::field(
        "Search limit",
        &ctx.config.search.default_limit.to_string(),
    );
    Ok(())
}

fn execute_set_db_path(ctx: &AppContext, raw: &str) -> Result<()> {
    let path = context::absolute_path(raw)?;
    let mut config = ctx.config.clone();
    config.storage.db_path = Some(path.display().to_string());
    config.save(&ctx.config_path)?;

    tracing::info!(path = %path.display(), "custom database path saved");
    output::success(&format!("Database path set to {}", path.display()));
    Ok(())
}

fn execute_reset_db_path(ctx: &AppContext) -> Result<()> {
    if ctx.config.storage.db_path.is_none() {
        output::warning("No custom database path is set");
        return Ok(());
    }

    let mut config = ctx.config.clone();
    config.storage.db_path = None;
    config.save(&ctx.config_path)?;
    output::success("Database path reset to the default");
    Ok(())
}
