/// Relevance scoring for symptom search.
///
/// Single-pass, fixed-weight substring matching over normalized text, plus a
/// keyword-table bonus that maps colloquial phrasings to canonical symptoms.
/// Scoring is a pure function of (query, record, keyword table): no state, no
/// ordering dependency between records.
///
/// Containment is plain substring matching with no word-boundary awareness,
/// so a short query can match inside unrelated words.
use aroma_common::catalog::OilRecord;

use crate::error::ApiError;
use crate::keywords::SymptomKeywords;
use crate::model::ScoredOil;
use crate::normalize::normalize;

/// Minimum query length, counted in chars after trimming.
pub const MIN_QUERY_CHARS: usize = 3;
/// Result list cap.
pub const MAX_RESULTS: usize = 10;

const WEIGHT_POSITIVE_PROPERTY: i32 = 3;
const WEIGHT_NEGATIVE_EMOTION: i32 = 3;
const WEIGHT_DESCRIPTION: i32 = 2;
const WEIGHT_TIP_CATEGORY: i32 = 2;
const WEIGHT_TIP_PHRASE: i32 = 1;
const WEIGHT_TAG: i32 = 2;
const WEIGHT_SYMPTOM_BONUS: i32 = 5;

pub struct SearchEngine {
    keywords: SymptomKeywords,
}

impl SearchEngine {
    /// The keyword table is injected so tests can run with alternate tables.
    pub fn new(keywords: SymptomKeywords) -> Self {
        Self { keywords }
    }

    /// Score `records` against `query` and return the top matches.
    ///
    /// Fails with `InvalidQuery` when the trimmed query is shorter than
    /// `MIN_QUERY_CHARS`. Records scoring zero are dropped; the rest are
    /// stable-sorted by score descending and truncated to `MAX_RESULTS`, so
    /// equal scores keep the order records arrived in.
    pub fn search(&self, query: &str, records: &[OilRecord]) -> Result<Vec<ScoredOil>, ApiError> {
        let trimmed = query.trim();
        if trimmed.chars().count() < MIN_QUERY_CHARS {
            return Err(ApiError::InvalidQuery);
        }
        let needle = normalize(trimmed);

        let mut scored: Vec<ScoredOil> = records
            .iter()
            .filter_map(|oil| {
                let score = self.score(&needle, oil);
                (score > 0).then(|| ScoredOil {
                    oil: oil.clone(),
                    relevance_score: score,
                })
            })
            .collect();

        scored.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
        scored.truncate(MAX_RESULTS);
        Ok(scored)
    }

    /// Additive score for one record. `needle` must already be normalized.
    /// No early exit: every field contributes.
    fn score(&self, needle: &str, oil: &OilRecord) -> i32 {
        let mut score = 0;

        for property in &oil.positive_properties {
            if normalize(property).contains(needle) {
                score += WEIGHT_POSITIVE_PROPERTY;
            }
        }
        for emotion in &oil.negative_emotions {
            if normalize(emotion).contains(needle) {
                score += WEIGHT_NEGATIVE_EMOTION;
            }
        }
        if normalize(&oil.description).contains(needle) {
            score += WEIGHT_DESCRIPTION;
        }
        for tip in &oil.usage_tips {
            if normalize(&tip.category).contains(needle) {
                score += WEIGHT_TIP_CATEGORY;
            }
            for phrase in &tip.phrases {
                if normalize(phrase).contains(needle) {
                    score += WEIGHT_TIP_PHRASE;
                }
            }
        }
        for tag in &oil.tags {
            if normalize(tag).contains(needle) {
                score += WEIGHT_TAG;
            }
        }

        // "ansioso" reaches oils tagged "ansiedade" even without a direct hit.
        for label in self.keywords.matching_labels(needle) {
            if mentions_label(oil, label) {
                score += WEIGHT_SYMPTOM_BONUS;
            }
        }

        score
    }
}

/// Whether any scored text field of the record contains `label`. Usage tips
/// are excluded from the bonus check.
fn mentions_label(oil: &OilRecord, label: &str) -> bool {
    oil.positive_properties
        .iter()
        .any(|p| normalize(p).contains(label))
        || oil
            .negative_emotions
            .iter()
            .any(|e| normalize(e).contains(label))
        || normalize(&oil.description).contains(label)
        || oil.tags.iter().any(|t| normalize(t).contains(label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aroma_common::catalog::UsageTip;

    fn oil(id: &str) -> OilRecord {
        OilRecord {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            positive_properties: Vec::new(),
            negative_emotions: Vec::new(),
            usage_tips: Vec::new(),
            tags: Vec::new(),
        }
    }

    fn engine() -> SearchEngine {
        SearchEngine::new(SymptomKeywords::brazilian_portuguese())
    }

    #[test]
    fn short_query_is_rejected_regardless_of_records() {
        let engine = engine();
        let mut record = oil("lavanda");
        record.tags.push("ab".to_string());

        for query in ["", "ab", "  ab  ", " a "] {
            let result = engine.search(query, &[record.clone()]);
            assert!(matches!(result, Err(ApiError::InvalidQuery)), "query {query:?}");
        }
    }

    #[test]
    fn three_chars_after_trimming_is_accepted() {
        let engine = engine();
        assert!(engine.search("  paz  ", &[]).is_ok());
    }

    #[test]
    fn scoring_is_case_and_diacritic_invariant() {
        let engine = engine();
        let mut record = oil("lavanda");
        record.description = "Alivia a ansiedade e acalma a mente.".to_string();
        record.tags.push("ansiedade".to_string());
        let records = [record];

        let baseline = engine.search("ansiedade", &records).unwrap();
        assert_eq!(baseline.len(), 1);
        // description +2, tag +2
        assert_eq!(baseline[0].relevance_score, 4);

        for query in ["ANSIEDADE", "ansiédade", "Ansiédade"] {
            let results = engine.search(query, &records).unwrap();
            assert_eq!(results.len(), baseline.len(), "query {query:?}");
            assert_eq!(
                results[0].relevance_score, baseline[0].relevance_score,
                "query {query:?}"
            );
            assert_eq!(results[0].oil.id, baseline[0].oil.id, "query {query:?}");
        }
    }

    #[test]
    fn single_positive_property_match_scores_exactly_three() {
        let engine = engine();
        let mut record = oil("laranja");
        record.positive_properties.push("otimismo".to_string());

        let results = engine.search("otimismo", &[record]).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].relevance_score, 3);
    }

    #[test]
    fn negative_emotion_match_scores_three() {
        let engine = engine();
        let mut record = oil("camomila");
        record.negative_emotions.push("frustração".to_string());

        let results = engine.search("frustração", &[record]).unwrap();
        assert_eq!(results[0].relevance_score, 3);
    }

    #[test]
    fn description_match_scores_two() {
        let engine = engine();
        let mut record = oil("alecrim");
        record.description = "Estimula a clareza mental.".to_string();

        let results = engine.search("clareza", &[record]).unwrap();
        assert_eq!(results[0].relevance_score, 2);
    }

    #[test]
    fn usage_tip_category_and_phrases_accumulate() {
        let engine = engine();
        let mut record = oil("eucalipto");
        record.usage_tips.push(UsageTip {
            category: "banho relaxante".to_string(),
            phrases: vec![
                "algumas gotas no banho morno".to_string(),
                "banho antes de dormir".to_string(),
                "use com um difusor".to_string(),
            ],
        });

        // category +2, two matching phrases +1 each
        let results = engine.search("banho", &[record]).unwrap();
        assert_eq!(results[0].relevance_score, 4);
    }

    #[test]
    fn tag_match_scores_two() {
        let engine = engine();
        let mut record = oil("hortelã");
        record.tags.push("energia".to_string());

        let results = engine.search("energia", &[record]).unwrap();
        assert_eq!(results[0].relevance_score, 2);
    }

    #[test]
    fn keyword_bonus_maps_colloquial_query_to_tagged_oil() {
        let engine = engine();
        let mut record = oil("lavanda");
        record.tags.push("ansiedade".to_string());

        // "ansioso" has no direct hit on any field; only the table bonus fires.
        let results = engine.search("ansioso", &[record]).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].relevance_score, 5);
    }

    #[test]
    fn keyword_bonus_accumulates_per_symptom() {
        let engine = engine();
        let mut record = oil("ylang");
        record.tags.push("ansiedade".to_string());
        record.negative_emotions.push("raiva".to_string());

        // Query triggers both "ansiedade" and "raiva"; the record mentions both.
        let results = engine.search("ansioso e irritado", &[record]).unwrap();
        assert_eq!(results[0].relevance_score, 10);
    }

    #[test]
    fn zero_scoring_records_are_dropped() {
        let engine = engine();
        let mut matching = oil("lavanda");
        matching.tags.push("calma".to_string());
        let unrelated = oil("gengibre");

        let results = engine.search("calma", &[unrelated, matching]).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].oil.id, "lavanda");
    }

    #[test]
    fn results_are_sorted_by_descending_score() {
        let engine = engine();

        let mut low = oil("low");
        low.tags.push("calma".to_string());

        let mut high = oil("high");
        high.positive_properties.push("calma".to_string());
        high.description = "Promove calma profunda.".to_string();
        high.tags.push("calma".to_string());

        let mut mid = oil("mid");
        mid.positive_properties.push("calma".to_string());

        let results = engine.search("calma", &[low, high, mid]).unwrap();
        let ids: Vec<&str> = results.iter().map(|s| s.oil.id.as_str()).collect();
        assert_eq!(ids, vec!["high", "mid", "low"]);
        for pair in results.windows(2) {
            assert!(pair[0].relevance_score >= pair[1].relevance_score);
        }
    }

    #[test]
    fn ties_preserve_input_order() {
        let engine = engine();
        let records: Vec<OilRecord> = ["primeiro", "segundo", "terceiro"]
            .iter()
            .map(|id| {
                let mut record = oil(id);
                record.tags.push("calma".to_string());
                record
            })
            .collect();

        let results = engine.search("calma", &records).unwrap();
        let ids: Vec<&str> = results.iter().map(|s| s.oil.id.as_str()).collect();
        assert_eq!(ids, vec!["primeiro", "segundo", "terceiro"]);
    }

    #[test]
    fn results_are_capped_at_ten() {
        let engine = engine();
        let records: Vec<OilRecord> = (0..15)
            .map(|i| {
                let mut record = oil(&format!("oleo-{i}"));
                record.tags.push("calma".to_string());
                record
            })
            .collect();

        let results = engine.search("calma", &records).unwrap();
        assert_eq!(results.len(), MAX_RESULTS);
        // Cap keeps the earliest of the tied records.
        assert_eq!(results[0].oil.id, "oleo-0");
        assert_eq!(results[9].oil.id, "oleo-9");
    }

    #[test]
    fn substring_containment_has_no_word_boundaries() {
        let engine = engine();
        let mut record = oil("copaiba");
        record.description = "Indicado para dores musculares.".to_string();

        // "dor" matches inside "dores"; containment is on the raw text.
        let results = engine.search("dor", &[record]).unwrap();
        assert_eq!(results[0].relevance_score, 2);
    }

    #[test]
    fn alternate_keyword_table_is_honored() {
        let pairs: &[(&str, &[&str])] = &[("coragem", &["covarde"])];
        let engine = SearchEngine::new(SymptomKeywords::from_pairs(pairs));
        let mut record = oil("tomilho");
        record.positive_properties.push("coragem".to_string());

        let results = engine.search("me sinto covarde", &[record]).unwrap();
        assert_eq!(results[0].relevance_score, 5);
    }
}
