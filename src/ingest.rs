// Upstream Ingestion Module
// Fetches the ZeroEval full and list leaderboard endpoints, joins them on
// model_id, and normalizes the rows into the merged export document. Rows
// that fail to convert are collected and reported, never fatal.

use crate::errors::BoardError;
use crate::types::{
    BenchmarkScores, DataStructure, EvalDocument, ModelMeta, ModelRecord, Organization, RankInfo,
};
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use std::collections::HashMap;

pub const DEFAULT_FULL_URL: &str =
    "https://api.zeroeval.com/leaderboard/models/full?justCanonicals=true";
pub const DEFAULT_LIST_URL: &str = "https://api.zeroeval.com/leaderboard/models/list";

/// One row of the `full` endpoint. Alternate spellings observed upstream are
/// carried so the pick chains below can fall through them; unknown fields are
/// ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FullRow {
    #[serde(default)]
    pub model_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub aime_2025_score: Option<f64>,
    #[serde(default)]
    pub gpqa_score: Option<f64>,
    #[serde(default)]
    pub mmmu_score: Option<f64>,
    #[serde(default)]
    pub chat_score: Option<f64>,
    #[serde(default)]
    pub swe_bench_verified_score: Option<f64>,
    #[serde(default)]
    pub code_score: Option<f64>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub release_time: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub model_license: Option<String>,
    #[serde(default)]
    pub license_name: Option<String>,
    #[serde(default)]
    pub context_length: Option<f64>,
    #[serde(default)]
    pub max_context: Option<f64>,
    #[serde(default)]
    pub context_window: Option<f64>,
    #[serde(default)]
    pub context_tokens: Option<f64>,
    #[serde(default)]
    pub input_price: Option<f64>,
    #[serde(default)]
    pub input_price_per_million: Option<f64>,
    #[serde(default)]
    pub price_input: Option<f64>,
    #[serde(default)]
    pub prompt_price: Option<f64>,
    #[serde(default)]
    pub output_price: Option<f64>,
    #[serde(default)]
    pub output_price_per_million: Option<f64>,
    #[serde(default)]
    pub price_output: Option<f64>,
    #[serde(default)]
    pub completion_price: Option<f64>,
}

impl FullRow {
    fn release_date(&self) -> Option<String> {
        self.release_date
            .clone()
            .or_else(|| self.release_time.clone())
            .or_else(|| self.date.clone())
    }

    fn license(&self) -> Option<String> {
        self.license
            .clone()
            .or_else(|| self.model_license.clone())
            .or_else(|| self.license_name.clone())
    }

    fn context_length(&self) -> Option<f64> {
        self.context_length
            .or(self.max_context)
            .or(self.context_window)
            .or(self.context_tokens)
    }

    fn input_price(&self) -> Option<f64> {
        self.input_price
            .or(self.input_price_per_million)
            .or(self.price_input)
            .or(self.prompt_price)
    }

    fn output_price(&self) -> Option<f64> {
        self.output_price
            .or(self.output_price_per_million)
            .or(self.price_output)
            .or(self.completion_price)
    }
}

/// One organization of the `list` endpoint with its nested models.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListOrg {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub models: Vec<ListModel>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListModel {
    #[serde(default)]
    pub model_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Join values from the list endpoint, keyed by model_id.
struct ListEntry {
    model_name: Option<String>,
    org_name: Option<String>,
}

/// A row that could not be converted, kept for reporting.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RowError {
    pub model_id: Option<String>,
    pub error: String,
}

/// Result of one ingestion run.
#[derive(Debug)]
pub struct IngestReport {
    pub document: EvalDocument,
    pub invalid: Vec<RowError>,
}

/// Lower-case and keep only alphanumerics, `-`, and `_`.
fn slug(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric() || matches!(*c, '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Flatten the nested list response for joining on model_id.
fn flatten_list(list: &[ListOrg]) -> HashMap<String, ListEntry> {
    let mut index = HashMap::new();
    for org in list {
        for model in &org.models {
            if let Some(id) = &model.model_id {
                index.insert(
                    id.clone(),
                    ListEntry {
                        model_name: model.name.clone(),
                        org_name: org.name.clone(),
                    },
                );
            }
        }
    }
    index
}

/// Convert one full-endpoint row into a document record. List-side values
/// take precedence for the model name and the organization display name; the
/// organization id is the slug of the full-side organization string.
fn convert_row(row: FullRow, index: &HashMap<String, ListEntry>) -> ModelRecord {
    let list_entry = row.model_id.as_deref().and_then(|id| index.get(id));
    let name = list_entry
        .and_then(|e| e.model_name.clone())
        .or_else(|| row.name.clone());
    let org_name = list_entry
        .and_then(|e| e.org_name.clone())
        .or_else(|| row.organization.clone());
    let org_id = row.organization.as_deref().map(slug);

    ModelRecord {
        model_id: row.model_id.clone(),
        name,
        organization: Some(Organization {
            id: org_id,
            name: org_name,
            icon_url: None,
        }),
        scores: Some(BenchmarkScores {
            aime_2025: row.aime_2025_score,
            gpqa: row.gpqa_score,
            mmmu: row.mmmu_score,
            chat: row.chat_score,
            swe_bench: row.swe_bench_verified_score,
            code: row.code_score,
        }),
        meta: Some(ModelMeta {
            release_date: row.release_date(),
            license: row.license(),
            context_length: row.context_length(),
            input_price: row.input_price(),
            output_price: row.output_price(),
        }),
        rank: Some(RankInfo {
            overall: None,
            last_change: None,
        }),
    }
}

/// Merge the two endpoint payloads into document records. Rows whose shape
/// does not match the expected types are collected with their errors.
pub fn merge_rows(
    full: Vec<serde_json::Value>,
    list: Vec<ListOrg>,
) -> (Vec<ModelRecord>, Vec<RowError>) {
    let index = flatten_list(&list);
    let mut models = Vec::new();
    let mut invalid = Vec::new();
    for value in full {
        let model_id = value
            .get("model_id")
            .and_then(|v| v.as_str())
            .map(String::from);
        match serde_json::from_value::<FullRow>(value) {
            Ok(row) => models.push(convert_row(row, &index)),
            Err(e) => invalid.push(RowError {
                model_id,
                error: e.to_string(),
            }),
        }
    }
    (models, invalid)
}

/// Assemble the merged export document around the converted records.
pub fn build_document(models: Vec<ModelRecord>, timestamp: String) -> EvalDocument {
    EvalDocument {
        version: "1.0".to_string(),
        last_updated: timestamp.clone(),
        data_structure: DataStructure {
            models,
            last_fetched: Some(timestamp),
        },
    }
}

/// Fetch both upstream endpoints and produce the merged document.
pub async fn fetch_document(full_url: &str, list_url: &str) -> Result<IngestReport, BoardError> {
    let client = reqwest::Client::new();

    tracing::info!(url = full_url, "fetching full leaderboard");
    let full: Vec<serde_json::Value> = client
        .get(full_url)
        .send()
        .await
        .map_err(|e| BoardError::Fetch(e.to_string()))?
        .json()
        .await
        .map_err(|e| BoardError::Decode(e.to_string()))?;

    tracing::info!(url = list_url, "fetching model list");
    let list: Vec<ListOrg> = client
        .get(list_url)
        .send()
        .await
        .map_err(|e| BoardError::Fetch(e.to_string()))?
        .json()
        .await
        .map_err(|e| BoardError::Decode(e.to_string()))?;

    let total = full.len();
    let (models, invalid) = merge_rows(full, list);
    tracing::info!(
        total,
        valid = models.len(),
        invalid = invalid.len(),
        "transformation finished"
    );

    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, false);
    Ok(IngestReport {
        document: build_document(models, timestamp),
        invalid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_list() -> Vec<ListOrg> {
        vec![ListOrg {
            name: Some("Mistral AI".to_string()),
            models: vec![ListModel {
                model_id: Some("mistral-large".to_string()),
                name: Some("Mistral Large".to_string()),
            }],
        }]
    }

    #[test]
    fn test_slug() {
        assert_eq!(slug("Mistral AI"), "mistralai");
        assert_eq!(slug("Z.ai"), "zai");
        assert_eq!(slug("zai-org"), "zai-org");
        assert_eq!(slug("OpenAI"), "openai");
        assert_eq!(slug("big_lab 2"), "big_lab2");
    }

    #[test]
    fn test_merge_prefers_list_side_names() {
        let full = vec![json!({
            "model_id": "mistral-large",
            "name": "mistral-large-v2",
            "organization": "Mistral AI",
            "gpqa_score": 0.7
        })];
        let (models, invalid) = merge_rows(full, sample_list());
        assert!(invalid.is_empty());
        assert_eq!(models.len(), 1);
        let m = &models[0];
        assert_eq!(m.name.as_deref(), Some("Mistral Large"));
        let org = m.organization.as_ref().unwrap();
        assert_eq!(org.id.as_deref(), Some("mistralai"));
        assert_eq!(org.name.as_deref(), Some("Mistral AI"));
        assert_eq!(m.scores.as_ref().unwrap().gpqa, Some(0.7));
    }

    #[test]
    fn test_merge_without_list_match_keeps_full_values() {
        let full = vec![json!({
            "model_id": "solo-model",
            "name": "Solo",
            "organization": "Solo Lab",
            "code_score": 0.5
        })];
        let (models, _) = merge_rows(full, Vec::new());
        let m = &models[0];
        assert_eq!(m.name.as_deref(), Some("Solo"));
        let org = m.organization.as_ref().unwrap();
        assert_eq!(org.id.as_deref(), Some("sololab"));
        assert_eq!(org.name.as_deref(), Some("Solo Lab"));
    }

    #[test]
    fn test_meta_pick_chains() {
        let full = vec![json!({
            "model_id": "m",
            "release_time": "2025-03-01",
            "model_license": "apache-2.0",
            "context_window": 200000.0,
            "prompt_price": 3.0,
            "completion_price": 15.0
        })];
        let (models, _) = merge_rows(full, Vec::new());
        let meta = models[0].meta.as_ref().unwrap();
        assert_eq!(meta.release_date.as_deref(), Some("2025-03-01"));
        assert_eq!(meta.license.as_deref(), Some("apache-2.0"));
        assert_eq!(meta.context_length, Some(200000.0));
        assert_eq!(meta.input_price, Some(3.0));
        assert_eq!(meta.output_price, Some(15.0));
    }

    #[test]
    fn test_invalid_rows_are_collected_not_fatal() {
        let full = vec![
            json!({"model_id": "good", "gpqa_score": 0.6}),
            json!({"model_id": "bad", "gpqa_score": "not a number"}),
        ];
        let (models, invalid) = merge_rows(full, Vec::new());
        assert_eq!(models.len(), 1);
        assert_eq!(invalid.len(), 1);
        assert_eq!(invalid[0].model_id.as_deref(), Some("bad"));
        assert!(!invalid[0].error.is_empty());
    }

    #[test]
    fn test_build_document_shape() {
        let (models, _) = merge_rows(vec![json!({"model_id": "m"})], Vec::new());
        let doc = build_document(models, "2025-06-01T00:00:00+00:00".to_string());
        assert_eq!(doc.version, "1.0");
        assert_eq!(doc.last_updated, "2025-06-01T00:00:00+00:00");
        assert_eq!(
            doc.data_structure.last_fetched.as_deref(),
            Some("2025-06-01T00:00:00+00:00")
        );
        assert_eq!(doc.data_structure.models.len(), 1);
        // Rank is carried as an empty sub-record for schema compatibility.
        let rank = doc.data_structure.models[0].rank.as_ref().unwrap();
        assert_eq!(rank.overall, None);
    }

    #[test]
    fn test_converted_rows_feed_the_pipeline() {
        let full = vec![
            json!({"model_id": "a", "organization": "OpenAI", "chat_score": 0.8}),
            json!({"model_id": "b", "organization": "Anthropic", "gpqa_score": 0.9}),
        ];
        let (models, _) = merge_rows(full, Vec::new());
        let map = crate::leaderboard::build_view_map(&models);
        assert_eq!(map.overall[0].name, "b");
        assert_eq!(map.overall[0].score, 90000);
        assert_eq!(map.overall[0].element_color, "neon-purple");
    }
}
