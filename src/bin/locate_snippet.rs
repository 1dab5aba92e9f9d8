//! Snippet Locator
//!
//! Runs the highlight pipeline against a dumped page and prints the result.
//! Useful for checking why a citation does or does not light up.
//!
//! The input is a JSON array of extracted fragments:
//! `[{"text": "The quick", "transform": [12, 0, 0, 12, 72, 700]}, ...]`
//!
//! Usage:
//!   cargo run --bin locate_snippet -- --fragments page3.json --query "quick brown"
//!   cargo run --bin locate_snippet -- --fragments page3.json --query "..." --page 3 --scale 1.5
//!   cargo run --bin locate_snippet -- --fragments page3.json --query "..." --per-line --verbose

use serde::Serialize;
use snippet_highlight::geometry::Matrix;
use snippet_highlight::highlight::{check_viewport_transform, HighlightEngine, PublishedHighlight};
use snippet_highlight::search::{find_span_with_config, MatchTier, SearchQuery};
use snippet_highlight::text::{normalize_with_config, RawFragment};
use snippet_highlight::{HighlightConfig, RectMode};
use std::fs;
use std::path::{Path, PathBuf};

struct LocatorConfig {
    fragments: Option<PathBuf>,
    query: Option<String>,
    page: i64,
    scale: f32,
    page_height: f32,
    per_line: bool,
    verbose: bool,
}

impl LocatorConfig {
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        let mut config = Self {
            fragments: None,
            query: None,
            page: 0,
            scale: 1.0,
            page_height: 792.0,
            per_line: false,
            verbose: false,
        };

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--fragments" => {
                    i += 1;
                    if i < args.len() {
                        config.fragments = Some(PathBuf::from(&args[i]));
                    }
                },
                "--query" => {
                    i += 1;
                    if i < args.len() {
                        config.query = Some(args[i].clone());
                    }
                },
                "--page" => {
                    i += 1;
                    if let Some(v) = args.get(i).and_then(|s| s.parse().ok()) {
                        config.page = v;
                    }
                },
                "--scale" => {
                    i += 1;
                    if let Some(v) = args.get(i).and_then(|s| s.parse().ok()) {
                        config.scale = v;
                    }
                },
                "--page-height" => {
                    i += 1;
                    if let Some(v) = args.get(i).and_then(|s| s.parse().ok()) {
                        config.page_height = v;
                    }
                },
                "--per-line" => {
                    config.per_line = true;
                },
                "--verbose" | "-v" => {
                    config.verbose = true;
                },
                other => {
                    eprintln!("Ignoring unknown argument: {}", other);
                },
            }
            i += 1;
        }

        config
    }
}

#[derive(Debug, Serialize)]
struct LocatorReport {
    normalized_query: Option<String>,
    tier: Option<MatchTier>,
    runs: usize,
    highlight: Option<PublishedHighlight>,
}

fn run(config: &LocatorConfig, path: &Path, raw_query: &str) -> snippet_highlight::Result<()> {
    let fragments: Vec<RawFragment> = serde_json::from_str(&fs::read_to_string(path)?)?;
    let query = SearchQuery::new(raw_query, config.page)?;
    let transform = Matrix::page_to_viewport(config.scale, config.page_height);
    check_viewport_transform(&transform)?;

    let mode = if config.per_line {
        RectMode::PerLine
    } else {
        RectMode::Single
    };
    let highlight_config = HighlightConfig::new().with_rect_mode(mode);
    let engine = HighlightEngine::with_config(highlight_config.clone())?;
    let index = engine.load_page(query.page(), &fragments);

    let normalized = normalize_with_config(raw_query, &highlight_config).ok();
    let tier = normalized
        .as_ref()
        .and_then(|q| find_span_with_config(&index, q, &highlight_config).tier());

    if config.verbose {
        eprintln!("Loaded {} fragments, {} runs", fragments.len(), index.runs().len());
        eprintln!("Full text: {:?}", index.full_text());
    }

    engine.highlight(query, &transform);

    let report = LocatorReport {
        normalized_query: normalized.map(|q| q.as_str().to_string()),
        tier,
        runs: index.runs().len(),
        highlight: engine.published(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn main() {
    env_logger::init();

    let config = LocatorConfig::from_args();

    let (Some(path), Some(raw_query)) = (config.fragments.clone(), config.query.clone()) else {
        eprintln!("Usage: locate_snippet --fragments <page.json> --query <text> [--page N]");
        eprintln!("                      [--scale S] [--page-height H] [--per-line] [--verbose]");
        std::process::exit(2);
    };

    if let Err(e) = run(&config, &path, &raw_query) {
        eprintln!("✗ {}", e);
        std::process::exit(1);
    }
}
