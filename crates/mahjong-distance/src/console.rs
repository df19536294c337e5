//! Colored console output for search events.
//!
//! Provides a `tracing` layer that formats search events with colors.
//! Initialized on the first convenience query when the `console` feature is
//! enabled.
//!
//! ## Log Levels
//!
//! - **INFO**: searches and matrices starting and ending
//! - **DEBUG**: expanded layers, widening passes, neighborhoods
//! - **TRACE**: neighbor counts and oracle cache resets (not formatted)

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use tracing::field::{Field, Visit};
use tracing::level_filters::LevelFilter;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

const DEFAULT_DIRECTIVE: &str = "mahjong_distance_search=info";

/// Installs the console subscriber.
///
/// Safe to call multiple times; only the first call has effect. `RUST_LOG`
/// overrides the default `mahjong_distance_search=info`.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::builder()
            .with_default_directive(
                DEFAULT_DIRECTIVE
                    .parse()
                    .unwrap_or_else(|_| LevelFilter::INFO.into()),
            )
            .from_env_lossy();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SearchConsoleLayer)
            .try_init();
    });
}

/// A tracing layer that formats search events with colors.
pub struct SearchConsoleLayer;

impl<S: Subscriber> Layer<S> for SearchConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("mahjong_distance") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    target: Option<String>,
    reason: Option<String>,
    sizes: Option<String>,
    error: Option<String>,
    sources: Option<u64>,
    max_depth: Option<u64>,
    distance: Option<u64>,
    source: Option<u64>,
    passes: Option<u64>,
    nodes: Option<u64>,
    elapsed_ms: Option<u64>,
    depth: Option<u64>,
    frontier: Option<u64>,
    visited: Option<u64>,
    from: Option<u64>,
    to: Option<u64>,
    rows: Option<u64>,
    cols: Option<u64>,
    reachable: Option<u64>,
    radius: Option<u64>,
    threads: Option<u64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        let s = s.trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "target" => self.target = Some(s),
            "reason" => self.reason = Some(s),
            "sizes" => self.sizes = Some(s),
            "error" => self.error = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "sources" => self.sources = Some(value),
            "max_depth" => self.max_depth = Some(value),
            "distance" => self.distance = Some(value),
            "source" => self.source = Some(value),
            "passes" => self.passes = Some(value),
            "nodes" => self.nodes = Some(value),
            "elapsed_ms" => self.elapsed_ms = Some(value),
            "depth" => self.depth = Some(value),
            "frontier" => self.frontier = Some(value),
            "visited" => self.visited = Some(value),
            "from" => self.from = Some(value),
            "to" => self.to = Some(value),
            "rows" => self.rows = Some(value),
            "cols" => self.cols = Some(value),
            "reachable" => self.reachable = Some(value),
            "radius" => self.radius = Some(value),
            "threads" => self.threads = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value as u64);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "target" => self.target = Some(value.to_string()),
            "reason" => self.reason = Some(value.to_string()),
            "error" => self.error = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    match v.event.as_deref().unwrap_or("") {
        "search_start" => format_search_start(v),
        "search_found" => format_search_found(v),
        "search_unreachable" => format_search_unreachable(v),
        "matrix_start" => format_matrix_start(v),
        "matrix_end" => format_matrix_end(v),
        "layer_expanded" => format_layer(v),
        "widen" => format_widen(v),
        "neighborhood" => format_neighborhood(v),
        "thread_pool_failed" if level == Level::WARN => format_pool_failed(v),
        _ => String::new(),
    }
}

fn info_prefix(tag: &str) -> String {
    format!(
        "{} {} {}",
        timestamp().bright_black(),
        "INFO".bright_green(),
        format!("[{}]", tag).bright_cyan()
    )
}

fn format_search_start(v: &EventVisitor) -> String {
    format!(
        "{} {} from {} source(s), max depth ({})",
        info_prefix("Search"),
        v.target.as_deref().unwrap_or("target").white().bold(),
        v.sources.unwrap_or(0).to_string().yellow(),
        v.max_depth.unwrap_or(0).to_string().yellow()
    )
}

fn format_search_found(v: &EventVisitor) -> String {
    format!(
        "{} Found at distance {} from source ({}): passes ({}), nodes expanded ({}), time spent ({})",
        info_prefix("Search"),
        v.distance.unwrap_or(0).to_string().bright_green().bold(),
        v.source.unwrap_or(0).to_string().yellow(),
        v.passes.unwrap_or(0).to_string().white(),
        v.nodes
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .bright_magenta(),
        format_duration_ms(v.elapsed_ms.unwrap_or(0)).yellow()
    )
}

fn format_search_unreachable(v: &EventVisitor) -> String {
    format!(
        "{} Unreachable: {}: passes ({}), nodes expanded ({}), time spent ({})",
        info_prefix("Search"),
        v.reason.as_deref().unwrap_or("unknown").bright_red(),
        v.passes.unwrap_or(0).to_string().white(),
        v.nodes
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .bright_magenta(),
        format_duration_ms(v.elapsed_ms.unwrap_or(0)).yellow()
    )
}

fn format_matrix_start(v: &EventVisitor) -> String {
    format!(
        "{} {} x {} pairs started",
        info_prefix("Matrix"),
        v.rows.unwrap_or(0).to_string().yellow(),
        v.cols.unwrap_or(0).to_string().yellow()
    )
}

fn format_matrix_end(v: &EventVisitor) -> String {
    let rows = v.rows.unwrap_or(0);
    let cols = v.cols.unwrap_or(0);
    format!(
        "{} {} x {} pairs ended: reachable ({}/{}), time spent ({})",
        info_prefix("Matrix"),
        rows.to_string().yellow(),
        cols.to_string().yellow(),
        v.reachable.unwrap_or(0).to_string().bright_green(),
        (rows * cols).to_formatted_string(&Locale::en),
        format_duration_ms(v.elapsed_ms.unwrap_or(0)).yellow()
    )
}

fn format_layer(v: &EventVisitor) -> String {
    format!(
        "    {} Depth {:>3} | frontier {:>10} | visited {:>10}",
        "->".bright_blue(),
        v.depth.unwrap_or(0),
        v.frontier
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .white(),
        v.visited.unwrap_or(0).to_formatted_string(&Locale::en).white()
    )
}

fn format_widen(v: &EventVisitor) -> String {
    format!(
        "    {} Widening limit {} -> {}",
        "->".bright_blue(),
        v.from.unwrap_or(0).to_string().yellow(),
        v.to.unwrap_or(0).to_string().yellow()
    )
}

fn format_neighborhood(v: &EventVisitor) -> String {
    format!(
        "{} radius ({}), layer sizes {}",
        info_prefix("Neighborhood"),
        v.radius.unwrap_or(0).to_string().yellow(),
        v.sizes.as_deref().unwrap_or("[]").white()
    )
}

fn format_pool_failed(v: &EventVisitor) -> String {
    format!(
        "{} {} {} could not start {} threads, searching sequentially: {}",
        timestamp().bright_black(),
        "WARN".bright_yellow(),
        "[Engine]".bright_cyan(),
        v.threads.unwrap_or(0).to_string().yellow(),
        v.error.as_deref().unwrap_or("unknown error")
    )
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 100000;
            let millis = d.subsec_millis();
            format!("{:5}.{:03}", secs, millis)
        })
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}
