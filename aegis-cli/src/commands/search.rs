//! Search command - one research query without the dashboard

use std::sync::Arc;

use aegis_core::{
    AegisConfig, CategoryFilter, FilterPolicy, FilterUpdate, SearchController, SearchOutcome,
    SearchResult, SimulatedSearch, TimeRange,
};
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Query text (words are joined with spaces)
    #[arg(required = true)]
    pub query: Vec<String>,

    /// Source category (all, peer-reviewed, government, news)
    #[arg(long)]
    pub category: Option<CategoryFilter>,

    /// Publication window (all, week, month, year)
    #[arg(long, value_name = "RANGE")]
    pub time_range: Option<TimeRange>,

    /// Relevance threshold in [0, 1]
    #[arg(long, value_name = "SCORE")]
    pub min_relevance: Option<f32>,

    /// Apply the filters to the results instead of only recording them
    #[arg(long)]
    pub refilter: bool,

    /// Override the simulated search delay in milliseconds
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run_search(args: SearchArgs, mut config: AegisConfig) -> Result<()> {
    if let Some(ms) = args.delay_ms {
        config.search.response_delay_ms = ms;
    }
    let policy = if args.refilter {
        FilterPolicy::Refilter
    } else {
        config.search.filter_policy
    };

    let backend = Arc::new(SimulatedSearch::new(config.search.delay()));
    let mut search = SearchController::new(backend)
        .with_policy(policy)
        .with_deadline(config.search.deadline())
        .with_filters(config.search.initial_filters());

    if let Some(category) = args.category {
        search.set_filter(FilterUpdate::Category(category));
    }
    if let Some(range) = args.time_range {
        search.set_filter(FilterUpdate::TimeRange(range));
    }
    if let Some(threshold) = args.min_relevance {
        search.set_filter(FilterUpdate::MinRelevance(threshold));
    }

    let query = args.query.join(" ");
    match search.search(query.as_str()) {
        SearchOutcome::Started { .. } => info!(query = %query, ?policy, "searching"),
        SearchOutcome::Empty => bail!("Nothing to search: the query is empty"),
        SearchOutcome::Disposed => bail!("Search panel is closed"),
    }

    search.settle().await;

    if let Some(err) = search.error() {
        bail!("Search failed: {}", err);
    }

    let now = Utc::now();
    let visible = search.visible_results(now);

    if args.json {
        let json = serde_json::to_string_pretty(&visible).context("Failed to serialize results")?;
        println!("{}", json);
        return Ok(());
    }

    let filters = search.filters();
    println!(
        "Filters: {} · {} · ≥{:.0}% ({})",
        filters.category.label(),
        filters.time_range.label(),
        filters.min_relevance * 100.0,
        match policy {
            FilterPolicy::DisplayOnly => "display only",
            FilterPolicy::Refilter => "applied",
        }
    );
    println!();

    if visible.is_empty() {
        println!("No results match \"{}\"", query);
    }
    for result in visible {
        print_result(result, now);
    }

    Ok(())
}

fn print_result(result: &SearchResult, now: DateTime<Utc>) {
    println!("{}", result.title);
    println!(
        "  [{}] {}% relevance · {} · {}",
        result.category.label(),
        result.relevance_percent(),
        result.source,
        result.observed_label(now)
    );
    println!("  {}", result.snippet);
    println!("  {}", result.url);
    println!();
}
