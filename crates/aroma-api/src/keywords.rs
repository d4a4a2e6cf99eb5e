/// Symptom keyword table.
///
/// Maps a canonical symptom label to the alternate phrasings a user may type
/// instead ("ansioso" → "ansiedade"). The table is immutable, built once at
/// process start, and passed explicitly into the search engine so tests can
/// inject alternate tables.
use crate::normalize::normalize;

/// Default table for Brazilian-Portuguese input.
///
/// Labels are canonical complaint categories as they appear in oil metadata
/// (tags, negative emotions). A label is deliberately not repeated inside its
/// own keyword list: a query equal to the label already matches record fields
/// directly.
const DEFAULT_TABLE: &[(&str, &[&str])] = &[
    (
        "ansiedade",
        &[
            "ansioso",
            "ansiosa",
            "nervoso",
            "nervosa",
            "preocupado",
            "preocupada",
            "aflito",
            "aflita",
            "angustiado",
            "angustiada",
        ],
    ),
    (
        "estresse",
        &[
            "estressado",
            "estressada",
            "tenso",
            "tensa",
            "sobrecarregado",
            "sobrecarregada",
            "pressão",
        ],
    ),
    (
        "insônia",
        &["sem sono", "não durmo", "acordado", "acordada", "madrugada"],
    ),
    (
        "tristeza",
        &[
            "triste",
            "deprimido",
            "deprimida",
            "desanimado",
            "desanimada",
            "melancolia",
            "chorando",
        ],
    ),
    (
        "raiva",
        &[
            "irritado",
            "irritada",
            "bravo",
            "brava",
            "furioso",
            "furiosa",
            "impaciente",
        ],
    ),
    (
        "medo",
        &[
            "medroso",
            "medrosa",
            "assustado",
            "assustada",
            "inseguro",
            "insegura",
            "pânico",
        ],
    ),
    (
        "cansaço",
        &[
            "cansado",
            "cansada",
            "exausto",
            "exausta",
            "esgotado",
            "esgotada",
            "fadiga",
            "sem energia",
        ],
    ),
    (
        "foco",
        &[
            "concentração",
            "concentrar",
            "distraído",
            "distraída",
            "atenção",
            "produtividade",
        ],
    ),
    (
        "dor de cabeça",
        &["enxaqueca", "cefaleia", "cabeça latejando"],
    ),
    (
        "solidão",
        &[
            "sozinho",
            "sozinha",
            "isolado",
            "isolada",
            "abandonado",
            "abandonada",
        ],
    ),
];

/// One canonical symptom with its alternate phrasings, stored normalized.
#[derive(Debug, Clone)]
pub struct SymptomEntry {
    pub label: String,
    pub keywords: Vec<String>,
}

/// Immutable symptom keyword table.
#[derive(Debug, Clone)]
pub struct SymptomKeywords {
    entries: Vec<SymptomEntry>,
}

impl SymptomKeywords {
    /// Build a table from raw (label, keywords) pairs.
    ///
    /// Labels and keywords are normalized here so lookups can assume
    /// pre-normalized text on both sides.
    pub fn from_pairs(pairs: &[(&str, &[&str])]) -> Self {
        let entries = pairs
            .iter()
            .map(|(label, keywords)| SymptomEntry {
                label: normalize(label),
                keywords: keywords.iter().map(|k| normalize(k)).collect(),
            })
            .collect();
        Self { entries }
    }

    /// The default Brazilian-Portuguese table.
    pub fn brazilian_portuguese() -> Self {
        Self::from_pairs(DEFAULT_TABLE)
    }

    /// Canonical labels triggered by `normalized_query`: those whose keyword
    /// set has an entry the query contains as a substring.
    pub fn matching_labels<'a>(
        &'a self,
        normalized_query: &'a str,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |entry| {
                entry
                    .keywords
                    .iter()
                    .any(|k| normalized_query.contains(k.as_str()))
            })
            .map(|entry| entry.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_maps_colloquial_to_canonical() {
        let table = SymptomKeywords::brazilian_portuguese();
        let labels: Vec<&str> = table.matching_labels("ansioso").collect();
        assert_eq!(labels, vec!["ansiedade"]);
    }

    #[test]
    fn entries_are_normalized_at_construction() {
        let pairs: &[(&str, &[&str])] = &[("Insônia", &["NÃO DURMO"])];
        let table = SymptomKeywords::from_pairs(pairs);
        let labels: Vec<&str> = table.matching_labels("eu nao durmo direito").collect();
        assert_eq!(labels, vec!["insonia"]);
    }

    #[test]
    fn label_is_not_its_own_keyword() {
        let table = SymptomKeywords::brazilian_portuguese();
        // The canonical term itself scores through direct field matches, not
        // through the bonus.
        assert_eq!(table.matching_labels("ansiedade").count(), 0);
    }

    #[test]
    fn query_containing_multiple_keywords_yields_multiple_labels() {
        let table = SymptomKeywords::brazilian_portuguese();
        let labels: Vec<&str> = table.matching_labels("ansioso e irritado").collect();
        assert_eq!(labels, vec!["ansiedade", "raiva"]);
    }

    #[test]
    fn unrelated_query_yields_nothing() {
        let table = SymptomKeywords::brazilian_portuguese();
        assert_eq!(table.matching_labels("alegria").count(), 0);
    }
}
