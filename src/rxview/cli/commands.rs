use super::args::{Cli, Commands, FilterArgs};
use super::logging::init_logging;
use super::render::{
    print_messages, render_config, render_facets, render_pagination, render_presets,
    render_tab_bar, render_tab_list, render_table,
};
use chrono::{NaiveDateTime, Utc};
use clap::Parser;
use rxview::api::RxviewApi;
use rxview::commands::{self, ConfigAction};
use rxview::config::RxviewConfig;
use rxview::definition::ViewDefinition;
use rxview::engine::PageRequest;
use rxview::error::{Result, RxviewError};
use rxview::fields::value::parse_date;
use rxview::model::SortOrder;
use rxview::presets::{self, PRESETS};
use rxview::source::fs::JsonFileSource;
use rxview::state::{FacetChoice, FilterState, SortSpec};
use rxview::workspace::{RxviewPaths, Scope};
use std::path::PathBuf;

struct AppContext {
    paths: RxviewPaths,
    scope: Scope,
    config: RxviewConfig,
    records: Option<PathBuf>,
    definition: Option<PathBuf>,
    preset: Option<String>,
    now: Option<String>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let ctx = init_context(&cli)?;

    match cli.command {
        Commands::View {
            filter,
            page,
            page_size,
            json,
        } => handle_view(&ctx, &filter, page, page_size, json),
        Commands::Facets { filter } => handle_facets(&ctx, &filter),
        Commands::Tabs { filter } => handle_tabs(&ctx, &filter),
        Commands::Presets => handle_presets(),
        Commands::Config { key, value } => handle_config(&ctx, key, value),
        Commands::Init => handle_init(&ctx),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let paths = RxviewPaths::discover(&cwd)?;
    let scope = if cli.global {
        Scope::Global
    } else {
        Scope::Project
    };
    let config = match RxviewConfig::load(paths.scope_dir(scope)) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable config");
            RxviewConfig::default()
        }
    };

    Ok(AppContext {
        paths,
        scope,
        config,
        records: cli.records.clone(),
        definition: cli.definition.clone(),
        preset: cli.preset.clone(),
        now: cli.now.clone(),
    })
}

fn resolve_definition(ctx: &AppContext) -> Result<ViewDefinition> {
    if let Some(path) = &ctx.definition {
        return ViewDefinition::load(path);
    }
    let name = ctx.preset.as_deref().unwrap_or(&ctx.config.default_preset);
    presets::preset(name).cloned().ok_or_else(|| {
        RxviewError::Api(format!(
            "Unknown preset: {} (available: {})",
            name,
            presets::preset_names().join(", ")
        ))
    })
}

fn reference_time(ctx: &AppContext) -> Result<NaiveDateTime> {
    match &ctx.now {
        Some(text) => parse_date(text)
            .ok_or_else(|| RxviewError::Api(format!("Invalid --now date: {}", text))),
        None => Ok(clock_now()),
    }
}

/// Record timestamps with an offset are normalized to UTC, so the clock is too.
fn clock_now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

fn open_api(ctx: &AppContext) -> Result<RxviewApi<JsonFileSource>> {
    let records = ctx.records.clone().ok_or_else(|| {
        RxviewError::Api("No records file given (use --records or RXVIEW_RECORDS)".to_string())
    })?;
    let definition = resolve_definition(ctx)?;
    let mut api = RxviewApi::new(JsonFileSource::new(records), definition, reference_time(ctx)?)?;
    api.refresh()?;
    Ok(api)
}

/// Builds the filter state from the view's defaults and the command line.
fn build_state(initial: FilterState, filter: &FilterArgs) -> Result<FilterState> {
    let mut state = initial;
    if let Some(tab) = &filter.tab {
        state = state.with_tab(tab.trim());
    }
    for pair in &filter.facets {
        let (id, value) = pair.split_once('=').ok_or_else(|| {
            RxviewError::Api(format!("Facet must be ID=VALUE, got '{}'", pair))
        })?;
        state = state.with_facet(id.trim(), FacetChoice::value(value));
    }
    for id in &filter.missing {
        state = state.with_facet(id.trim(), FacetChoice::Missing);
    }
    if let Some(search) = &filter.search {
        state = state.with_search(search.as_str());
    }
    if let Some(field) = &filter.sort {
        let order = if filter.desc {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        };
        state = state.with_sort(SortSpec::new(field.trim(), order));
    }
    Ok(state)
}

fn handle_view(
    ctx: &AppContext,
    filter: &FilterArgs,
    page: usize,
    page_size: Option<usize>,
    json: bool,
) -> Result<()> {
    let api = open_api(ctx)?;
    let state = build_state(api.initial_state(), filter)?;
    let request = PageRequest::new(page, page_size.unwrap_or(ctx.config.page_size));
    let result = api.view(&state, request)?;

    if json {
        let payload = serde_json::json!({
            "view": api.definition().name,
            "pagination": result.pagination,
            "records": result.page_slice,
            "facets": result.facet_summaries,
            "tabs": result.tab_counts,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    if !result.tab_counts.is_empty() {
        print!("{}", render_tab_bar(&result.tab_counts));
        println!();
    }
    print!(
        "{}",
        render_table(api.engine_config().fields(), &result.page_slice)
    );
    print!("{}", render_pagination(&result.pagination));
    Ok(())
}

fn handle_facets(ctx: &AppContext, filter: &FilterArgs) -> Result<()> {
    let api = open_api(ctx)?;
    let state = build_state(api.initial_state(), filter)?;
    api.check_state(&state)?;
    let summaries = api.facet_summaries(&state);
    print!(
        "{}",
        render_facets(api.engine_config().facets(), &summaries, &state)
    );
    Ok(())
}

fn handle_tabs(ctx: &AppContext, filter: &FilterArgs) -> Result<()> {
    let api = open_api(ctx)?;
    let state = build_state(api.initial_state(), filter)?;
    api.check_state(&state)?;
    print!("{}", render_tab_list(&api.tab_counts(&state)));
    Ok(())
}

fn handle_presets() -> Result<()> {
    print!("{}", render_presets(&PRESETS));
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);
    let result = commands::config(&ctx.paths, ctx.scope, action)?;

    if show_all {
        if let Some(config) = &result.config {
            print!("{}", render_config(config));
        }
    }
    print_messages(&result.messages);
    if result.has_errors() {
        return Err(RxviewError::Api("config command failed".to_string()));
    }
    Ok(())
}

fn handle_init(ctx: &AppContext) -> Result<()> {
    let result = commands::init(&ctx.paths, ctx.scope)?;
    print_messages(&result.messages);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> FilterArgs {
        FilterArgs::default()
    }

    #[test]
    fn state_starts_from_view_defaults() {
        let initial = FilterState::new()
            .with_tab("all")
            .with_sort(SortSpec::desc("date"));
        let state = build_state(initial.clone(), &filter()).unwrap();
        assert_eq!(state, initial);
    }

    #[test]
    fn state_from_flags() {
        let args = FilterArgs {
            tab: Some("pending".into()),
            facets: vec!["appType=Initial".into(), "note=a=b".into()],
            missing: vec!["assignee".into()],
            search: Some("bio".into()),
            sort: Some("brand".into()),
            desc: true,
        };
        let state = build_state(FilterState::new(), &args).unwrap();
        assert_eq!(state.active_tab.as_deref(), Some("pending"));
        assert_eq!(state.facet("appType"), Some(&FacetChoice::value("Initial")));
        assert_eq!(state.facet("note"), Some(&FacetChoice::value("a=b")));
        assert_eq!(state.facet("assignee"), Some(&FacetChoice::Missing));
        assert_eq!(state.search_query, "bio");
        assert_eq!(state.sort, Some(SortSpec::desc("brand")));
    }

    #[test]
    fn clock_matches_parsed_offset_timestamps() {
        let stamp = Utc::now().to_rfc3339();
        let now = clock_now();
        let parsed = parse_date(&stamp).unwrap();
        assert!((now - parsed).num_seconds().abs() <= 1);
    }

    #[test]
    fn malformed_facet_flag_is_an_error() {
        let args = FilterArgs {
            facets: vec!["appType".into()],
            ..FilterArgs::default()
        };
        assert!(build_state(FilterState::new(), &args).is_err());
    }
}
