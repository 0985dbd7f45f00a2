//! Closed pattern sets used by the heuristics.
//!
//! Every vocabulary the pipeline matches against lives here as a named,
//! compiled-once set, so the lists can be tested and extended without
//! touching the scoring logic that consumes them.

use regex::Regex;

/// Numbered-section forms accepted by the heading gate: `N.`, `N.N`,
/// `N.N.N`, and the single-letter-dot form, each followed by an alphabetic
/// word. Matched case-insensitively, as the whole gate set is.
const NUMBERED_FORMS: &[&str] = &[
    r"^\d+\.\s[A-Za-z]+",
    r"^\d+\.\d+\s[A-Za-z]+",
    r"^\d+\.\d+\.\d+\s[A-Za-z]+",
    r"^[A-Z]\.\s[A-Za-z]+",
];

/// Section-introducing keyword vocabulary for the heading gate, optionally
/// followed by a capital and/or a colon.
const SECTION_KEYWORDS: &str = r"^(Chapter|Section|Appendix|Summary|Background|Milestones|Approach|Evaluation|Preamble|Membership|Term|Chair|Meetings|Lines|Financial|Timeline|Equitable|Shared|Local|Access|Guidance|Training|Provincial|Technological|What could|Phase [I]{1,3}|For each|Ontario|Critical|Business|Introduction|Overview|Revision|Table of Contents|Acknowledgements|References|Learning|Entry|Structure|Keeping|Content|Application|Form|Grant|LTC|Name|Designation|Date|Permanent|Temporary|Home Town|Particulars|Block Year|Nature|Place|Duration|Advance|Family|Whether)\s?[A-Z]?\s?:?";

/// Single-digit "N word" numbered-item form used by structured forms.
const NUMBERED_ITEM_FORM: &str = r"^(1|2|3|4|5|6|7|8|9|10)\s[A-Za-z]+";

/// Boilerplate rejected during ingestion: pure digits, single-letter-plus-
/// period tokens, page markers, version markers, short date strings.
const BOILERPLATE_FORMS: &[&str] = &[
    r"^\d+$",
    r"^\w\.$",
    r"^Page \d+ of \d+",
    r"^Version \d+\.\d+",
    r"^\d{1,2} [A-Za-z]{3} \d{4}",
];

/// Keywords that qualify a block as an H1 when the geometry agrees.
/// Overlaps the gate vocabulary but is distinct from it, and matches
/// case-sensitively.
const TOP_LEVEL_KEYWORDS: &str = r"^(Ontario|Appendix|The Business|Approach|Evaluation|Preamble|Chapter|Section|Overview|Table|Acknowledgements|References|Introduction|Revision|Application|Form)";

/// Second-level vocabulary plus the single-level numbered prefix, matched
/// case-sensitively at the start of the text.
const SECOND_LEVEL_FORMS: &str = r"^(?:\d+\.\s|Summary|Background|Milestones|Membership|Term|Chair|Meetings|Lines|Financial|Business|Learning|Entry|Structure|Keeping|Content|Name|Designation|Date|Permanent|Temporary|Home Town|Particulars|Block Year|Nature|Place|Duration|Advance|Family|Whether)";

/// Document-type terms a title candidate must contain (case-insensitive
/// substring).
const TITLE_TERMS: &str = r"(?i)rfp|request|proposal|business|plan|ontario|digital|library|foundation|level|extensions|syllabus|agile|tester|overview|application|form|ltc|grant|chapter|section|introduction|summary|background";

/// The heading gate's pattern set. A block matching zero patterns can never
/// be a heading; each matched pattern also contributes score mass.
pub struct HeadingLexicon {
    patterns: Vec<Regex>,
}

impl HeadingLexicon {
    pub fn new() -> Self {
        let mut patterns: Vec<Regex> = NUMBERED_FORMS
            .iter()
            .map(|p| Regex::new(&format!("(?i){p}")).unwrap())
            .collect();
        patterns.push(Regex::new(&format!("(?i){SECTION_KEYWORDS}")).unwrap());
        patterns.push(Regex::new(&format!("(?i){NUMBERED_ITEM_FORM}")).unwrap());
        Self { patterns }
    }

    /// Number of gate patterns the text matches.
    pub fn match_count(&self, text: &str) -> usize {
        self.patterns.iter().filter(|p| p.is_match(text)).count()
    }
}

impl Default for HeadingLexicon {
    fn default() -> Self {
        Self::new()
    }
}

/// Boilerplate set applied to normalized fragment text during ingestion.
pub struct BoilerplateLexicon {
    patterns: Vec<Regex>,
}

impl BoilerplateLexicon {
    pub fn new() -> Self {
        Self {
            patterns: BOILERPLATE_FORMS
                .iter()
                .map(|p| Regex::new(p).unwrap())
                .collect(),
        }
    }

    pub fn is_boilerplate(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(text))
    }
}

impl Default for BoilerplateLexicon {
    fn default() -> Self {
        Self::new()
    }
}

/// Keyword sets consulted by the level assigner.
pub struct LevelLexicon {
    top_level: Regex,
    second_level: Regex,
}

impl LevelLexicon {
    pub fn new() -> Self {
        Self {
            top_level: Regex::new(TOP_LEVEL_KEYWORDS).unwrap(),
            second_level: Regex::new(SECOND_LEVEL_FORMS).unwrap(),
        }
    }

    /// Text starts with a top-level keyword.
    pub fn is_top_level(&self, text: &str) -> bool {
        self.top_level.is_match(text)
    }

    /// Text starts with a single-level numbered prefix or a second-level
    /// keyword.
    pub fn is_second_level(&self, text: &str) -> bool {
        self.second_level.is_match(text)
    }
}

impl Default for LevelLexicon {
    fn default() -> Self {
        Self::new()
    }
}

/// Document-type vocabulary consulted by the title extractor.
pub struct TitleLexicon {
    terms: Regex,
}

impl TitleLexicon {
    pub fn new() -> Self {
        Self {
            terms: Regex::new(TITLE_TERMS).unwrap(),
        }
    }

    /// Text contains at least one document-type term.
    pub fn contains_term(&self, text: &str) -> bool {
        self.terms.is_match(text)
    }
}

impl Default for TitleLexicon {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_forms() {
        let lex = HeadingLexicon::new();
        assert_eq!(lex.match_count("1. Introduction"), 1);
        assert_eq!(lex.match_count("2.1 Scope of Work"), 1);
        assert_eq!(lex.match_count("2.1.3 Deliverables"), 1);
        assert_eq!(lex.match_count("A. Background Material"), 1);
        // "1 Introduction" is the forms variant, not a dotted form
        assert_eq!(lex.match_count("1 Introduction"), 1);
    }

    #[test]
    fn test_keyword_gate_is_case_insensitive() {
        let lex = HeadingLexicon::new();
        assert!(lex.match_count("Summary of Findings") >= 1);
        assert!(lex.match_count("summary of findings") >= 1);
        assert!(lex.match_count("APPENDIX B: Terms") >= 1);
    }

    #[test]
    fn test_gate_rejects_plain_prose() {
        let lex = HeadingLexicon::new();
        assert_eq!(lex.match_count("The quick brown fox jumps over it"), 0);
        assert_eq!(lex.match_count("We expect results next quarter"), 0);
    }

    #[test]
    fn test_boilerplate() {
        let lex = BoilerplateLexicon::new();
        assert!(lex.is_boilerplate("42"));
        assert!(lex.is_boilerplate("A."));
        assert!(lex.is_boilerplate("Page 3 of 10"));
        assert!(lex.is_boilerplate("Version 1.2"));
        assert!(lex.is_boilerplate("21 Mar 2022"));
        assert!(!lex.is_boilerplate("Chapter 3 Results"));
    }

    #[test]
    fn test_level_keywords_are_case_sensitive() {
        let lex = LevelLexicon::new();
        assert!(lex.is_top_level("Introduction and Scope"));
        assert!(!lex.is_top_level("introduction and scope"));
        assert!(lex.is_second_level("Background of the Program"));
        assert!(lex.is_second_level("3. Funding Details"));
        assert!(!lex.is_second_level("background of the program"));
    }

    #[test]
    fn test_title_terms_are_substring_matches() {
        let lex = TitleLexicon::new();
        assert!(lex.contains_term("Request for Proposal: Digital Library"));
        assert!(lex.contains_term("ONTARIO LIBRARIES WORKING TOGETHER"));
        assert!(!lex.contains_term("Quarterly financial update"));
    }
}
