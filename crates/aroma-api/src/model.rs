use serde::{Deserialize, Serialize};

use aroma_common::catalog::OilRecord;

/// An oil record paired with the relevance score computed for one query.
///
/// Transient: exists only between scoring and response serialization (or a
/// cache round-trip of the same).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredOil {
    #[serde(flatten)]
    pub oil: OilRecord,
    /// Additive integer relevance, used solely for ranking.
    #[serde(rename = "relevanceScore")]
    pub relevance_score: i32,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub query: String,
    pub results: Vec<ScoredOil>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct OilListResponse {
    pub success: bool,
    pub oils: Vec<OilRecord>,
    pub count: usize,
}

#[derive(Debug, Deserialize)]
pub struct SuggestionRequest {
    pub feeling: String,
}

#[derive(Debug, Serialize)]
pub struct SuggestionResponse {
    pub success: bool,
    pub feeling: String,
    pub suggestion: String,
    /// Names of the catalog oils the suggestion was grounded on, best first.
    pub oils: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}
