//! End-to-end tests: fragments in, published viewport rectangles out.

use snippet_highlight::geometry::{Matrix, Rect};
use snippet_highlight::highlight::{
    to_rects, to_rects_with_config, CompletionOutcome, HighlightEngine, SessionStatus,
};
use snippet_highlight::search::{find_span, SearchQuery};
use snippet_highlight::text::{build_index, normalize, RawFragment};
use snippet_highlight::{HighlightConfig, RectMode};
use std::sync::Arc;
use std::thread;

const PAGE_HEIGHT: f32 = 792.0;

fn viewport(scale: f32) -> Matrix {
    Matrix::page_to_viewport(scale, PAGE_HEIGHT)
}

fn scenario_a_fragments() -> Vec<RawFragment> {
    vec![
        RawFragment::at("The quick", 72.0, 700.0, 12.0),
        RawFragment::at("brown fox jumps", 72.0, 686.0, 12.0),
    ]
}

fn query(text: &str, page: i64) -> SearchQuery {
    SearchQuery::new(text, page).expect("valid page")
}

mod geometry {
    use super::*;

    #[test]
    fn test_scenario_a_single_rect() {
        let index = build_index(&scenario_a_fragments());
        let span = find_span(&index, &normalize("quick brown").unwrap());
        let rects = to_rects(&index, &span, &viewport(1.0));

        assert_eq!(rects.len(), 1);
        let r = rects[0];
        assert!(r.width > 0.0 && r.height > 0.0);
        // Covers both baselines: 686 - 12 up to 700, flipped.
        assert!((r.y - (PAGE_HEIGHT - 700.0)).abs() < 1e-3);
        assert!((r.bottom() - (PAGE_HEIGHT - 674.0)).abs() < 1e-3);
    }

    #[test]
    fn test_scenario_c_no_rects() {
        let index = build_index(&scenario_a_fragments());
        let span = find_span(&index, &normalize("xyz nonexistent phrase").unwrap());
        assert!(to_rects(&index, &span, &viewport(1.0)).is_empty());
    }

    #[test]
    fn test_single_run_rect_inside_run_extent() {
        let index = build_index(&[RawFragment::at("alpha beta gamma", 100.0, 500.0, 10.0)]);
        let span = find_span(&index, &normalize("beta").unwrap());
        let r = to_rects(&index, &span, &viewport(1.0))[0];
        let run = &index.runs()[0];
        assert!(r.left() >= run.origin_x);
        assert!(r.right() <= run.origin_x + run.width(0.6) + 1e-3);
        assert!((r.left() - (100.0 + 6.0 * 6.0)).abs() < 1e-3);
    }

    #[test]
    fn test_rects_non_negative_near_page_edge() {
        let index = build_index(&[RawFragment::at("corner text", -5.0, PAGE_HEIGHT + 4.0, 12.0)]);
        let span = find_span(&index, &normalize("corner").unwrap());
        let r = to_rects(&index, &span, &viewport(2.0))[0];
        assert!(r.x >= 0.0 && r.y >= 0.0);
        assert!(r.width >= 0.0 && r.height >= 0.0);
    }

    #[test]
    fn test_per_line_mode_splits_wrapped_match() {
        let index = build_index(&scenario_a_fragments());
        let span = find_span(&index, &normalize("quick brown").unwrap());
        let config = HighlightConfig::new().with_rect_mode(RectMode::PerLine);
        let rects = to_rects_with_config(&index, &span, &viewport(1.0), &config);
        assert_eq!(rects.len(), 2);

        let single = to_rects(&index, &span, &viewport(1.0))[0];
        let union = rects[0].union(&rects[1]);
        assert!((union.x - single.x).abs() < 1e-3);
        assert!((union.bottom() - single.bottom()).abs() < 1e-3);
    }

    #[test]
    fn test_published_rects_serialize_for_overlay() {
        let engine = HighlightEngine::new();
        engine.load_page(0, &scenario_a_fragments());
        engine.highlight(query("quick brown", 0), &viewport(1.0));
        let json = serde_json::to_value(engine.published().unwrap()).unwrap();
        assert_eq!(json["page"], 0);
        assert_eq!(json["rects"].as_array().unwrap().len(), 1);
        assert!(json["rects"][0]["width"].as_f64().unwrap() > 0.0);
    }
}

mod engine {
    use super::*;

    #[test]
    fn test_image_only_page_yields_empty_highlight() {
        let engine = HighlightEngine::new();
        engine.load_page(4, &[]);
        let outcome = engine.highlight(query("anything at all", 4), &viewport(1.0));
        assert_eq!(outcome, CompletionOutcome::Applied);
        assert!(engine.published().unwrap().rects.is_empty());
    }

    #[test]
    fn test_page_not_extracted_yet() {
        let engine = HighlightEngine::new();
        engine.highlight(query("quick brown", 9), &viewport(1.0));
        assert!(engine.published().unwrap().rects.is_empty());
    }

    #[test]
    fn test_reextraction_replaces_index() {
        let engine = HighlightEngine::new();
        engine.load_page(0, &[RawFragment::at("old words here", 72.0, 700.0, 12.0)]);
        engine.load_page(0, &[RawFragment::at("fresh words here", 72.0, 700.0, 12.0)]);

        engine.highlight(query("fresh words", 0), &viewport(1.0));
        assert_eq!(engine.published().unwrap().rects.len(), 1);
        engine.highlight(query("old words here", 0), &viewport(1.0));
        assert!(engine.published().unwrap().rects.is_empty());
    }

    #[test]
    fn test_new_query_keeps_old_rects_until_applied() {
        let engine = HighlightEngine::new();
        engine.load_page(0, &scenario_a_fragments());
        engine.highlight(query("quick brown", 0), &viewport(1.0));
        let shown = engine.published().unwrap();

        let ticket = engine.submit(query("fox jumps", 0));
        assert_eq!(engine.status(), SessionStatus::Computing(ticket.generation()));
        assert_eq!(engine.published().unwrap(), shown);

        let rects = engine.compute(&ticket, &viewport(1.0));
        assert_eq!(engine.complete(&ticket, rects), CompletionOutcome::Applied);
        assert_ne!(engine.published().unwrap().rects, shown.rects);
    }

    #[test]
    fn test_idempotent_compute() {
        let engine = HighlightEngine::new();
        engine.load_page(0, &scenario_a_fragments());
        let ticket = engine.submit(query("quick brown", 0));
        let a: Vec<Rect> = engine.compute(&ticket, &viewport(1.5));
        let b: Vec<Rect> = engine.compute(&ticket, &viewport(1.5));
        assert_eq!(a, b);
    }
}

mod supersession {
    use super::*;

    #[test]
    fn test_slow_older_generation_is_discarded() {
        let engine = Arc::new(HighlightEngine::new());
        engine.load_page(0, &scenario_a_fragments());

        let older = engine.submit(query("quick brown", 0));
        let newer = engine.submit(query("fox jumps", 0));

        let fast = {
            let engine = Arc::clone(&engine);
            let newer = newer.clone();
            thread::spawn(move || {
                let rects = engine.compute(&newer, &viewport(1.0));
                engine.complete(&newer, rects)
            })
        };
        assert_eq!(fast.join().unwrap(), CompletionOutcome::Applied);

        let slow = {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                let rects = engine.compute(&older, &viewport(1.0));
                engine.complete(&older, rects)
            })
        };
        assert_eq!(slow.join().unwrap(), CompletionOutcome::Superseded);

        let shown = engine.published().unwrap();
        assert_eq!(shown.generation, newer.generation());
        let expected = engine.compute(&newer, &viewport(1.0));
        assert_eq!(shown.rects, expected);
    }

    #[test]
    fn test_many_concurrent_requests_publish_latest() {
        let engine = Arc::new(HighlightEngine::new());
        engine.load_page(0, &scenario_a_fragments());

        let tickets: Vec<_> = ["the quick", "quick brown", "brown fox", "fox jumps"]
            .iter()
            .map(|q| engine.submit(query(q, 0)))
            .collect();
        let latest = tickets.last().unwrap().generation();

        let handles: Vec<_> = tickets
            .into_iter()
            .rev()
            .map(|ticket| {
                let engine = Arc::clone(&engine);
                thread::spawn(move || {
                    let rects = engine.compute(&ticket, &viewport(1.0));
                    engine.complete(&ticket, rects)
                })
            })
            .collect();

        let applied = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|o| *o == CompletionOutcome::Applied)
            .count();

        assert_eq!(applied, 1);
        assert_eq!(engine.published().unwrap().generation, latest);
        assert_eq!(engine.status(), SessionStatus::Applied(latest));
    }

    #[test]
    fn test_clear_discards_in_flight_work() {
        let engine = HighlightEngine::new();
        engine.load_page(0, &scenario_a_fragments());
        let ticket = engine.submit(query("quick brown", 0));
        engine.clear();

        let rects = engine.compute(&ticket, &viewport(1.0));
        assert_eq!(rects.len(), 1);
        assert_eq!(engine.complete(&ticket, rects), CompletionOutcome::Superseded);
        assert_eq!(engine.status(), SessionStatus::Idle);
        assert!(engine.published().is_none());
    }
}
