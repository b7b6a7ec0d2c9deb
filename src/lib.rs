//! # LLMBoard - LLM Leaderboard Engine
//!
//! Derives ranked leaderboard views (overall, reasoning, popularity, coding,
//! newest) from a third-party LLM benchmark export.
//!
//! ## Features
//!
//! - Pure, total derivation pipeline: absent fields degrade to documented
//!   defaults and ties keep stable input order
//! - Organization logo and theme-color resolution with alias handling
//! - Memoized single-fetch document loading from a file or URL
//! - Upstream ZeroEval ingestion producing the merged export document
//! - JSON API server for the derived views
//!
//! ## Usage
//!
//! ### As a CLI
//!
//! ```bash
//! # Fetch upstream data, then serve the leaderboard
//! llmboard fetch
//! llmboard serve --port 8080
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use llmboard::{build_view_map, types::EvalDocument};
//!
//! let doc = EvalDocument::from_json(r#"{"data_structure": {"models": []}}"#).unwrap();
//! let views = build_view_map(&doc.data_structure.models);
//! assert!(views.overall.is_empty());
//! ```

// Core library modules
pub mod errors;
pub mod ingest;
pub mod leaderboard;
pub mod source;
pub mod types;

// CLI module (for `llmboard serve` command)
pub mod cli;

// Re-export commonly used types
pub use errors::BoardError;
pub use leaderboard::{
    build_view_map, coding_percent, overall_score, popularity_score, reasoning_score,
    resolve_org_logo, to_item,
};
pub use source::{derive_leaderboard, CachedSource, DataSource};
pub use types::{EvalDocument, LeaderboardData, LeaderboardItem, ModelRecord, ViewMap};
