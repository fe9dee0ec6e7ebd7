mod adapters;
mod cli;
mod config;
mod core;
mod logging;

use clap::Parser;

use adapters::store::sqlite_store::SqliteLogStore;
use cli::commands::search::SearchArgs;
use cli::context::AppContext;
use cli::{Cli, Commands};
use crate::core::errors::Result;
use crate::core::services::log_service::LogService;

fn main() {
    let args = Cli::parse();
    logging::init(args.verbose, args.quiet);

    if let Err(e) = run(&args) {
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}

fn run(args: &Cli) -> Result<()> {
    let ctx = AppContext::resolve(args.config.as_deref(), args.db.as_deref())?;

    if let Commands::Config { action } = &args.command {
        return cli::commands::config::execute(action, &ctx);
    }

    let store = SqliteLogStore::open(&ctx.db_path)?
        .with_preview_chars(ctx.config.report.preview_chars);
    let mut service = LogService::new(store);
    let default_limit = ctx.config.search.default_limit;

    match &args.command {
        Commands::Add {
            content,
            category,
            tags,
            context,
        } => cli::commands::add::execute(
            &mut service,
            content,
            category,
            tags.as_deref(),
            context,
        ),
        Commands::Search {
            keyword,
            start,
            end,
            file,
            project,
            branch,
            category,
            limit,
        } => {
            let search = SearchArgs {
                keyword: keyword.as_deref(),
                start: start.as_deref(),
                end: end.as_deref(),
                file: file.as_deref(),
                project: project.as_deref(),
                branch: branch.as_deref(),
                category: category.as_deref(),
            };
            cli::commands::search::execute(&service, &search, limit.unwrap_or(default_limit))
        }
        Commands::Recent { limit } => cli::commands::search::execute_recent(&service, *limit),
        Commands::Category { category, limit } => cli::commands::search::execute_category(
            &service,
            category,
            limit.unwrap_or(default_limit),
        ),
        Commands::Get { id } => cli::commands::search::execute_get(&service, *id),
        Commands::Update {
            id,
            content,
            category,
            tags,
            context,
        } => cli::commands::edit::execute_update(
            &mut service,
            *id,
            content.as_deref(),
            category.as_deref(),
            tags.as_deref(),
            context,
        ),
        Commands::Delete { id } => cli::commands::edit::execute_delete(&mut service, *id),
        Commands::Show { date } => cli::commands::show::execute(&service, date.as_deref()),
        Commands::Prompt { kind } => cli::commands::prompt::execute(&service, kind),
        Commands::Stats => cli::commands::stats::execute(&service),
        Commands::Config { .. } => Ok(()),
    }
}
