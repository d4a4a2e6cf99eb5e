use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::info;

use aroma_common::ai::SuggestionClient;
use aroma_common::catalog::CatalogClient;

use crate::cache::ResponseCache;
use crate::error::ApiError;
use crate::model::{
    OilListResponse, ScoredOil, SearchRequest, SearchResponse, SuggestionRequest,
    SuggestionResponse,
};
use crate::normalize::normalize;
use crate::search::{SearchEngine, MAX_RESULTS, MIN_QUERY_CHARS};

/// Number of top-scored oils fed into the suggestion prompt.
const SUGGESTION_OILS: usize = 3;

const SUGGESTION_SYSTEM_PROMPT: &str = "You are a warm, knowledgeable aromatherapy \
assistant for a Brazilian wellness app. Always answer in Brazilian Portuguese. \
Recommend only from the oils provided when any are listed. Never give medical advice \
or claim to treat illness.";

pub struct AppState {
    pub engine: SearchEngine,
    pub catalog: CatalogClient,
    pub cache: ResponseCache,
    pub ai: SuggestionClient,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/oils", get(list_oils_handler))
        .route("/api/search", post(search_handler))
        .route("/api/suggestions", post(suggestion_handler))
        .with_state(state)
}

async fn health_handler() -> &'static str {
    "ok"
}

/// Symptom search: validate, try the cache, otherwise fetch the catalog and
/// score. The envelope always echoes the caller's (trimmed) query.
async fn search_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = request.query.trim().to_string();
    if query.chars().count() < MIN_QUERY_CHARS {
        return Err(ApiError::InvalidQuery);
    }

    let needle = normalize(&query);
    if let Some(results) = state.cache.get_search(&needle, MAX_RESULTS).await {
        info!(query = %query, "search cache hit");
        return Ok(Json(search_envelope(query, results)));
    }

    let records = state.catalog.fetch_oils().await?;
    let results = state.engine.search(&query, &records)?;
    state.cache.set_search(&needle, MAX_RESULTS, &results).await;

    info!(query = %query, count = results.len(), "search completed");
    Ok(Json(search_envelope(query, results)))
}

/// Read-only listing of the catalog, cached briefly.
async fn list_oils_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<OilListResponse>, ApiError> {
    if let Some(oils) = state.cache.get_oils().await {
        let count = oils.len();
        return Ok(Json(OilListResponse {
            success: true,
            oils,
            count,
        }));
    }

    let oils = state.catalog.fetch_oils().await?;
    state.cache.set_oils(&oils).await;

    let count = oils.len();
    Ok(Json(OilListResponse {
        success: true,
        oils,
        count,
    }))
}

/// AI-backed suggestion: rank the catalog against the reported feeling, then
/// have the chat model phrase a recommendation grounded on the top oils.
async fn suggestion_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SuggestionRequest>,
) -> Result<Json<SuggestionResponse>, ApiError> {
    let feeling = request.feeling.trim().to_string();
    if feeling.chars().count() < MIN_QUERY_CHARS {
        return Err(ApiError::InvalidQuery);
    }

    let records = state.catalog.fetch_oils().await?;
    let ranked = state.engine.search(&feeling, &records)?;
    let top: Vec<&ScoredOil> = ranked.iter().take(SUGGESTION_OILS).collect();

    let prompt = suggestion_prompt(&feeling, &top);
    let suggestion = state.ai.complete(SUGGESTION_SYSTEM_PROMPT, &prompt).await?;

    info!(feeling = %feeling, oils = top.len(), "suggestion generated");
    let oils = top.iter().map(|s| s.oil.name.clone()).collect();
    Ok(Json(SuggestionResponse {
        success: true,
        feeling,
        suggestion,
        oils,
    }))
}

fn search_envelope(query: String, results: Vec<ScoredOil>) -> SearchResponse {
    let count = results.len();
    SearchResponse {
        success: true,
        query,
        results,
        count,
    }
}

fn suggestion_prompt(feeling: &str, oils: &[&ScoredOil]) -> String {
    let mut prompt = format!("The user reports feeling: \"{feeling}\".\n");
    if oils.is_empty() {
        prompt.push_str("No catalog oils matched this feeling; suggest a gentle general option.\n");
    } else {
        prompt.push_str("Catalog oils that matched, best first:\n");
        for scored in oils {
            prompt.push_str(&format!("- {}: {}\n", scored.oil.name, scored.oil.description));
        }
    }
    prompt.push_str(
        "Write a short, warm suggestion (2-3 sentences) naming which oil to use and one way to use it.",
    );
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use aroma_common::catalog::OilRecord;

    fn scored(name: &str, description: &str, score: i32) -> ScoredOil {
        ScoredOil {
            oil: OilRecord {
                id: name.to_lowercase(),
                name: name.to_string(),
                description: description.to_string(),
                positive_properties: Vec::new(),
                negative_emotions: Vec::new(),
                usage_tips: Vec::new(),
                tags: Vec::new(),
            },
            relevance_score: score,
        }
    }

    #[test]
    fn search_envelope_counts_results() {
        let envelope = search_envelope(
            "ansiedade".to_string(),
            vec![scored("Lavanda", "Acalma.", 4), scored("Camomila", "Suaviza.", 2)],
        );
        assert!(envelope.success);
        assert_eq!(envelope.query, "ansiedade");
        assert_eq!(envelope.count, 2);
    }

    #[test]
    fn suggestion_prompt_lists_oils_best_first() {
        let lavanda = scored("Lavanda", "Acalma a mente.", 7);
        let camomila = scored("Camomila", "Suaviza tensões.", 3);
        let prompt = suggestion_prompt("ansioso", &[&lavanda, &camomila]);

        assert!(prompt.contains("\"ansioso\""));
        let lavanda_at = prompt.find("Lavanda").unwrap();
        let camomila_at = prompt.find("Camomila").unwrap();
        assert!(lavanda_at < camomila_at);
        assert!(prompt.contains("Acalma a mente."));
    }

    #[test]
    fn suggestion_prompt_handles_no_matches() {
        let prompt = suggestion_prompt("saudade", &[]);
        assert!(prompt.contains("No catalog oils matched"));
    }
}
