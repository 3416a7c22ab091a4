/*!
`filter` command group.

`list` shows, per filter, the defaults of its kind overlaid with the filter's
own settings, so unchanged defaults are visible too.
*/

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};

use crate::cmd::Context;
use crate::cmd::format::{Align, Table, settings_lines, snake_case_to_title_case};
use crate::obs::Transport;

#[derive(Args, Debug)]
pub struct FilterArgs {
    #[command(subcommand)]
    pub command: FilterCommand,
}

#[derive(Args, Debug, Clone)]
pub struct FilterTarget {
    /// Source the filter is attached to
    pub source: String,
    /// Filter name
    pub filter: String,
}

#[derive(Subcommand, Debug)]
pub enum FilterCommand {
    /// List filters of a source
    #[command(visible_alias = "ls")]
    List {
        /// Source to inspect (default: current program scene)
        source: Option<String>,
    },
    /// Enable a filter
    #[command(visible_alias = "on")]
    Enable(FilterTarget),
    /// Disable a filter
    #[command(visible_alias = "off")]
    Disable(FilterTarget),
    /// Toggle a filter
    #[command(visible_alias = "tg")]
    Toggle(FilterTarget),
    /// Report whether a filter is enabled
    #[command(visible_alias = "ss")]
    Status(FilterTarget),
}

pub async fn execute_filter<T: Transport>(args: FilterArgs, ctx: &mut Context<'_, T>) -> Result<()> {
    match args.command {
        FilterCommand::List { source } => list(ctx, source).await,
        FilterCommand::Enable(target) => {
            set_enabled(ctx, &target, true).await?;
            ctx.print(format!(
                "Filter {} enabled on source {}.",
                ctx.style.highlight(&target.filter),
                ctx.style.highlight(&target.source)
            ))
        }
        FilterCommand::Disable(target) => {
            set_enabled(ctx, &target, false).await?;
            ctx.print(format!(
                "Filter {} disabled on source {}.",
                ctx.style.highlight(&target.filter),
                ctx.style.highlight(&target.source)
            ))
        }
        FilterCommand::Toggle(target) => {
            let enabled = !is_enabled(ctx, &target).await?;
            set_enabled(ctx, &target, enabled).await?;
            let state = if enabled { "enabled" } else { "disabled" };
            ctx.print(format!(
                "Filter {} on source {} is now {state}.",
                ctx.style.highlight(&target.filter),
                ctx.style.highlight(&target.source)
            ))
        }
        FilterCommand::Status(target) => {
            let state = if is_enabled(ctx, &target).await? { "enabled" } else { "disabled" };
            ctx.print(format!(
                "Filter {} on source {} is {state}.",
                ctx.style.highlight(&target.filter),
                ctx.style.highlight(&target.source)
            ))
        }
    }
}

async fn is_enabled<T: Transport>(ctx: &mut Context<'_, T>, target: &FilterTarget) -> Result<bool> {
    let filter = ctx
        .client
        .filters()
        .get(&target.source, &target.filter)
        .await
        .with_context(|| {
            format!("failed to get filter {} on source {}", target.filter, target.source)
        })?;
    Ok(filter.filter_enabled)
}

async fn set_enabled<T: Transport>(ctx: &mut Context<'_, T>, target: &FilterTarget, enabled: bool) -> Result<()> {
    let verb = if enabled { "enable" } else { "disable" };
    ctx.client
        .filters()
        .set_enabled(&target.source, &target.filter, enabled)
        .await
        .with_context(|| format!("failed to {verb} filter {} on source {}", target.filter, target.source))
}

async fn list<T: Transport>(ctx: &mut Context<'_, T>, source: Option<String>) -> Result<()> {
    let source = ctx.scene_or_current(source).await?;
    let filters = ctx
        .client
        .filters()
        .list(&source)
        .await
        .with_context(|| format!("failed to list filters of source {source}"))?;
    if filters.is_empty() {
        return ctx.print(format!(
            "No filters found for source {}.",
            ctx.style.highlight(&source)
        ));
    }

    let mut table = Table::new(&["Filter Name", "Kind", "Enabled", "Settings"]).align(&[
        Align::Left,
        Align::Left,
        Align::Center,
        Align::Left,
    ]);
    for filter in filters {
        let mut settings = ctx
            .client
            .filters()
            .default_settings(&filter.filter_kind)
            .await
            .with_context(|| format!("failed to get default settings for filter {}", filter.filter_name))?;
        settings.extend(filter.filter_settings);
        table.row([
            filter.filter_name,
            snake_case_to_title_case(&filter.filter_kind),
            ctx.style.mark(filter.filter_enabled),
            settings_lines(&settings),
        ]);
    }
    ctx.table(&table)
}
