// Leaderboard Derivation Pipeline
// Pure, synchronous transform from benchmark model records to the five
// ranked views. Nothing here performs I/O or fails: absent inputs degrade
// to documented defaults and ties are broken by stable input order.

use crate::types::{ItemStats, LeaderboardItem, ModelRecord, ViewMap};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Scale factor for the overall/reasoning/popularity views. Large enough to
/// preserve sub-percentage-point ordering when scores are compared as
/// integers.
const SCORE_SCALE: f64 = 100_000.0;

/// Scale factor for views displayed directly as a percentage.
const PERCENT_SCALE: f64 = 100.0;

/// Theme color used when an organization has no mapping.
const DEFAULT_COLOR: &str = "neon-blue";

/// Generic avatar used when neither a bundled logo nor an icon URL exists.
pub const PLACEHOLDER_AVATAR: &str = "/placeholder.svg?height=100&width=100";

/// Number of overall entries used when no record has a parseable release
/// date and the newmodels view falls back to the overall ranking.
const NEWMODELS_FALLBACK_LEN: usize = 10;

/// Theme-color tag per lower-cased organization id.
pub static ORG_COLOR: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("openai", "neon-green"),
        ("anthropic", "neon-purple"),
        ("google", "neon-blue"),
        ("meta", "neon-blue"),
        ("deepseek", "neon-pink"),
        ("alibaba", "destructive"),
        ("mistralai", "neon-blue"),
        ("xai", "neon-purple"),
    ])
});

/// Resolve an organization id to its bundled logo path.
///
/// The id is matched case-insensitively; known alias spellings are rewritten
/// to their canonical key before the extension lookup. Empty or absent input
/// returns an empty string so the caller can apply its own fallback. This is
/// a pure string function; whether the asset exists on disk is a
/// presentation-layer concern.
pub fn resolve_org_logo(id: Option<&str>) -> String {
    let raw = id.unwrap_or("").to_lowercase();
    if raw.is_empty() {
        return String::new();
    }
    let canonical = match raw.as_str() {
        "mistralai" => "mistral",
        "zai" => "zai-org",
        other => other,
    };
    let ext = match canonical {
        "anthropic" | "google" | "meta" | "ibm" | "mistral" | "moonshotai" | "nvidia"
        | "xai" | "openai" | "zai-org" => "svg",
        "cohere" | "deepseek" | "ai21" | "minimax" | "qwen" => "webp",
        _ => "svg",
    };
    format!("/logo/{canonical}.{ext}")
}

/// Round the first present value in a priority chain, scaled to an integer.
fn scale(value: Option<f64>, factor: f64) -> i64 {
    (value.unwrap_or(0.0) * factor).round() as i64
}

/// Overall score: chat → gpqa → aime_2025 → mmmu → code → swe_bench.
pub fn overall_score(m: &ModelRecord) -> i64 {
    let v = m.scores.as_ref().and_then(|s| {
        s.chat
            .or(s.gpqa)
            .or(s.aime_2025)
            .or(s.mmmu)
            .or(s.code)
            .or(s.swe_bench)
    });
    scale(v, SCORE_SCALE)
}

/// Reasoning score: gpqa → aime_2025 → mmmu.
pub fn reasoning_score(m: &ModelRecord) -> i64 {
    let v = m
        .scores
        .as_ref()
        .and_then(|s| s.gpqa.or(s.aime_2025).or(s.mmmu));
    scale(v, SCORE_SCALE)
}

/// Popularity score: chat → gpqa.
///
/// Shares its prefix with the overall chain; the two views frequently
/// coincide and are kept separate on purpose.
pub fn popularity_score(m: &ModelRecord) -> i64 {
    let v = m.scores.as_ref().and_then(|s| s.chat.or(s.gpqa));
    scale(v, SCORE_SCALE)
}

/// Coding score as a 0-100 percentage: code → swe_bench.
pub fn coding_percent(m: &ModelRecord) -> i64 {
    let v = m.scores.as_ref().and_then(|s| s.code.or(s.swe_bench));
    scale(v, PERCENT_SCALE)
}

/// Whether a record participates in the coding view at all. Records with
/// neither coding benchmark are excluded entirely rather than scored as zero.
fn has_coding_score(m: &ModelRecord) -> bool {
    m.scores
        .as_ref()
        .is_some_and(|s| s.code.or(s.swe_bench).is_some())
}

/// Display name: `name` if non-empty, else `model_id`, else `"Unknown"`.
fn display_name(m: &ModelRecord) -> &str {
    m.name
        .as_deref()
        .filter(|s| !s.is_empty())
        .or(m.model_id.as_deref().filter(|s| !s.is_empty()))
        .unwrap_or("Unknown")
}

/// Convert one record plus its precomputed score and 1-based rank into the
/// display entity. Total: never fails on any documented input shape.
pub fn to_item(m: &ModelRecord, score: i64, rank: u32) -> LeaderboardItem {
    let org = m.organization.as_ref();
    let org_id = org
        .and_then(|o| o.id.as_deref())
        .unwrap_or("")
        .to_lowercase();
    let element_color = ORG_COLOR
        .get(org_id.as_str())
        .copied()
        .unwrap_or(DEFAULT_COLOR);

    let logo = resolve_org_logo(org.and_then(|o| o.id.as_deref()));
    let avatar = if logo.is_empty() {
        org.and_then(|o| o.icon_url.clone())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| PLACEHOLDER_AVATAR.to_string())
    } else {
        logo
    };

    let name = display_name(m);
    let org_name = org
        .and_then(|o| o.name.as_deref())
        .filter(|s| !s.is_empty())
        .unwrap_or("Unknown");

    let stats = ItemStats {
        reasoning: scale(m.scores.as_ref().and_then(|s| s.gpqa), PERCENT_SCALE),
        coding: scale(m.scores.as_ref().and_then(|s| s.code), PERCENT_SCALE),
        creative: scale(m.scores.as_ref().and_then(|s| s.mmmu), PERCENT_SCALE),
    };

    LeaderboardItem {
        id: rank,
        rank,
        name: name.to_string(),
        avatar,
        score,
        element: org_name.to_string(),
        element_color: element_color.to_string(),
        description: format!("{name} · {org_name}"),
        stats,
    }
}

/// Sort a view's candidates descending by score and map them to ranked items.
/// `sort_by_key` is stable, so records with equal scores keep their relative
/// input order.
fn ranked(candidates: Vec<&ModelRecord>, score: fn(&ModelRecord) -> i64) -> Vec<LeaderboardItem> {
    let mut sorted = candidates;
    sorted.sort_by_key(|m| Reverse(score(m)));
    sorted
        .into_iter()
        .enumerate()
        .map(|(i, m)| to_item(m, score(m), i as u32 + 1))
        .collect()
}

/// Parse a release date leniently: plain ISO date, RFC 3339 timestamp, or
/// slash-separated date. Anything else is treated as unparseable. Timestamps
/// keep their time component so same-day releases order correctly.
fn parse_release_date(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(d.and_time(NaiveTime::MIN));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y/%m/%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

/// Build all five ranked views from the full record list.
///
/// The input is never mutated; each call is independent and yields identical
/// output for identical input. The newmodels view keeps only records with a
/// parseable release date, newest first; when none parse it degrades to the
/// head of the overall view (items keep their overall ranks).
pub fn build_view_map(models: &[ModelRecord]) -> ViewMap {
    let overall = ranked(models.iter().collect(), overall_score);
    let reasoning = ranked(models.iter().collect(), reasoning_score);
    let popularity = ranked(models.iter().collect(), popularity_score);
    let coding = ranked(
        models.iter().filter(|m| has_coding_score(m)).collect(),
        coding_percent,
    );

    let mut dated: Vec<(&ModelRecord, NaiveDateTime)> = models
        .iter()
        .filter_map(|m| {
            m.meta
                .as_ref()
                .and_then(|meta| meta.release_date.as_deref())
                .and_then(parse_release_date)
                .map(|d| (m, d))
        })
        .collect();
    dated.sort_by_key(|&(_, d)| Reverse(d));
    let newmodels = if dated.is_empty() {
        overall
            .iter()
            .take(NEWMODELS_FALLBACK_LEN)
            .cloned()
            .collect()
    } else {
        dated
            .into_iter()
            .enumerate()
            .map(|(i, (m, _))| to_item(m, overall_score(m), i as u32 + 1))
            .collect()
    };

    ViewMap {
        overall,
        reasoning,
        popularity,
        coding,
        newmodels,
    }
}
