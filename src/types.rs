// Benchmark Export Types
// These types mirror the ZeroEval merged-leaderboard document shape.
// Every field tolerates absence: the export is produced by a third party
// and individual records are frequently incomplete.

use serde::{Deserialize, Serialize};

/// The top-level benchmark export document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvalDocument {
    #[serde(default)]
    pub version: String,
    /// Upstream timestamp, passed through for display.
    #[serde(default)]
    pub last_updated: String,
    #[serde(default)]
    pub data_structure: DataStructure,
}

impl EvalDocument {
    /// Decode a document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Container for the model records and the ingestion stamp.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataStructure {
    #[serde(default)]
    pub models: Vec<ModelRecord>,
    #[serde(default)]
    pub last_fetched: Option<String>,
}

/// One benchmark-evaluated model as received from the export.
///
/// No identity uniqueness is enforced; duplicate `model_id` values are
/// treated as independent records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelRecord {
    #[serde(default)]
    pub model_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub organization: Option<Organization>,
    #[serde(default)]
    pub scores: Option<BenchmarkScores>,
    #[serde(default)]
    pub meta: Option<ModelMeta>,
    #[serde(default)]
    pub rank: Option<RankInfo>,
}

/// Organization sub-record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Organization {
    /// Lookup key for logo/color resolution, matched case-insensitively.
    #[serde(default)]
    pub id: Option<String>,
    /// Display label.
    #[serde(default)]
    pub name: Option<String>,
    /// Fallback avatar when no bundled logo exists.
    #[serde(default)]
    pub icon_url: Option<String>,
}

/// Benchmark scores, each conceptually in `[0, 1]`. Any may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BenchmarkScores {
    #[serde(default)]
    pub aime_2025: Option<f64>,
    #[serde(default)]
    pub gpqa: Option<f64>,
    #[serde(default)]
    pub mmmu: Option<f64>,
    #[serde(default)]
    pub chat: Option<f64>,
    #[serde(default)]
    pub swe_bench: Option<f64>,
    #[serde(default)]
    pub code: Option<f64>,
}

/// Model metadata. Only `release_date` is read by the view builder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelMeta {
    /// ISO-ish date string; parseability is not guaranteed.
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub context_length: Option<f64>,
    #[serde(default)]
    pub input_price: Option<f64>,
    #[serde(default)]
    pub output_price: Option<f64>,
}

/// Upstream rank sub-record, carried through the document but never
/// consulted when building views.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankInfo {
    #[serde(default)]
    pub overall: Option<f64>,
    #[serde(default)]
    pub last_change: Option<f64>,
}

/// The normalized, display-ready representation of one model within one view.
///
/// `id` and `rank` are the 1-based position within the owning view's sort
/// order; the same underlying model carries a different rank per view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardItem {
    pub id: u32,
    pub rank: u32,
    pub name: String,
    pub avatar: String,
    pub score: i64,
    /// Organization display name.
    pub element: String,
    /// Theme-color tag for the organization.
    #[serde(rename = "elementColor")]
    pub element_color: String,
    pub description: String,
    pub stats: ItemStats,
}

/// Per-item benchmark breakdown, scaled to 0-100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStats {
    pub reasoning: i64,
    pub coding: i64,
    pub creative: i64,
}

/// All five ranked views derived from one record list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewMap {
    pub overall: Vec<LeaderboardItem>,
    pub reasoning: Vec<LeaderboardItem>,
    pub popularity: Vec<LeaderboardItem>,
    pub coding: Vec<LeaderboardItem>,
    pub newmodels: Vec<LeaderboardItem>,
}

impl ViewMap {
    /// Look up a view by its wire key. Returns `None` for unknown keys.
    pub fn get(&self, key: &str) -> Option<&[LeaderboardItem]> {
        match key {
            "overall" => Some(&self.overall),
            "reasoning" => Some(&self.reasoning),
            "popularity" => Some(&self.popularity),
            "coding" => Some(&self.coding),
            "newmodels" => Some(&self.newmodels),
            _ => None,
        }
    }

    /// The five wire keys, in display order.
    pub const KEYS: [&'static str; 5] =
        ["overall", "reasoning", "popularity", "coding", "newmodels"];
}

/// The fully derived leaderboard: views plus the pass-through timestamp.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeaderboardData {
    pub last_updated: String,
    pub views: ViewMap,
}
