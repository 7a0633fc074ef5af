use serde::{Deserialize, Serialize};

/// Run-time settings. Everything has a default; a JSON file may override any part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValenceConfig {
    /// Verbs for which enrichment and correction sheets are produced and read.
    pub selected_verbs: Vec<String>,
    /// Lexemes with a registered flowchart; their decisions are confident.
    pub flowcharts: Vec<String>,
    /// Verbal stems the flowchart is applied to. Empty means every stem.
    pub verbal_stems: Vec<String>,
    /// How many cases a report lists before summarising the rest.
    pub error_limit: usize,
    /// Base of the documentation links in notes.
    pub flowchart_base: String,
    /// Version written into every note.
    pub note_version: String,
    /// Passage viewer linked from correction sheets.
    pub passage_base: String,
}

fn words(list: &str) -> Vec<String> {
    list.split_whitespace().map(str::to_string).collect()
}

impl Default for ValenceConfig {
    fn default() -> Self {
        Self {
            selected_verbs: words("CJT BR> QR> <BR <LH BW> CWB HLK JRD JY> NPL NWS SWR NTN <FH FJM NF> PQD"),
            flowcharts: words("<FH BR> CJT DBQ FJM NTN QR> ZQN"),
            verbal_stems: words("qal"),
            error_limit: 10,
            flowchart_base: "https://github.com/ETCBC/valence/wiki".to_string(),
            note_version: "c".to_string(),
            passage_base: "https://shebanq.ancient-data.org/hebrew/text".to_string(),
        }
    }
}

impl ValenceConfig {
    pub fn is_selected(&self, lexeme: &str) -> bool {
        self.selected_verbs.iter().any(|v| v == lexeme)
    }

    pub fn has_flowchart(&self, lexeme: &str) -> bool {
        self.flowcharts.iter().any(|v| v == lexeme)
    }

    /// Link to a passage. Never contains the sheet separator.
    pub fn passage_link(&self, book: &str, chapter: u32, verse: u32) -> String {
        format!(
            "{}?book={}&chapter={}&verse={}&version={}",
            self.passage_base, book, chapter, verse, self.note_version
        )
    }

    pub fn applies_to_stem(&self, stem: Option<&str>) -> bool {
        self.verbal_stems.is_empty()
            || stem.is_some_and(|s| self.verbal_stems.iter().any(|v| v == s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ValenceConfig::default();
        assert_eq!(config.selected_verbs.len(), 18);
        assert!(config.is_selected("NTN"));
        assert!(config.has_flowchart("ZQN"));
        assert!(!config.has_flowchart("HLK"));
        assert!(config.applies_to_stem(Some("qal")));
        assert!(!config.applies_to_stem(Some("hif")));
        assert!(!config.applies_to_stem(None));
        assert_eq!(
            config.passage_link("Genesis", 1, 29),
            "https://shebanq.ancient-data.org/hebrew/text?book=Genesis&chapter=1&verse=29&version=c"
        );
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: ValenceConfig =
            serde_json::from_str(r#"{ "verbal_stems": [], "error_limit": 3 }"#).unwrap();
        assert_eq!(config.error_limit, 3);
        assert!(config.applies_to_stem(Some("hif")));
        assert!(config.applies_to_stem(None));
        assert_eq!(config.flowcharts.len(), 8);
    }
}
