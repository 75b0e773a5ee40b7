//! Curated affirmative/negative keyword tables.

use ahash::AHashSet;

use crate::error::{AssentError, Result};
use crate::intent::Intent;

/// Ordered affirmative and negative keyword tables with hashed exact
/// membership.
///
/// Keywords are stored lowercased. Scan order (for containment and fuzzy
/// passes) follows the configured order; exact membership is O(1) via hash
/// sets. The affirmative table is always consulted before the negative one —
/// a term accidentally present in both sets therefore resolves
/// `Affirmative`. This preserves the historical tie-break and is deliberate;
/// duplicates *within* one set are rejected at construction.
#[derive(Debug, Clone)]
pub struct Lexicon {
    affirmative: Vec<String>,
    negative: Vec<String>,
    affirmative_set: AHashSet<String>,
    negative_set: AHashSet<String>,
}

impl Lexicon {
    /// Build a lexicon from two keyword lists.
    ///
    /// Returns a `Configuration` error if a list contains an empty keyword
    /// or a duplicate (case-insensitive) entry.
    pub fn new(affirmative: Vec<String>, negative: Vec<String>) -> Result<Self> {
        let (affirmative, affirmative_set) = Self::build_set("affirmative", affirmative)?;
        let (negative, negative_set) = Self::build_set("negative", negative)?;

        Ok(Lexicon {
            affirmative,
            negative,
            affirmative_set,
            negative_set,
        })
    }

    fn build_set(name: &str, keywords: Vec<String>) -> Result<(Vec<String>, AHashSet<String>)> {
        let mut ordered = Vec::with_capacity(keywords.len());
        let mut set = AHashSet::with_capacity(keywords.len());

        for keyword in keywords {
            let keyword = keyword.to_lowercase();
            if keyword.trim().is_empty() {
                return Err(AssentError::configuration(format!(
                    "Empty keyword in {name} set"
                )));
            }
            if !set.insert(keyword.clone()) {
                return Err(AssentError::configuration(format!(
                    "Duplicate keyword '{keyword}' in {name} set"
                )));
            }
            ordered.push(keyword);
        }

        Ok((ordered, set))
    }

    /// Case-insensitive exact membership test for a single token.
    ///
    /// The affirmative set is checked first; see the type-level note on the
    /// tie-break.
    pub fn exact_match(&self, token: &str) -> Option<Intent> {
        let token = token.to_lowercase();
        if self.affirmative_set.contains(&token) {
            Some(Intent::Affirmative)
        } else if self.negative_set.contains(&token) {
            Some(Intent::Negative)
        } else {
            None
        }
    }

    /// Substring containment test against the whole normalized text.
    ///
    /// This is the coarse pass that runs between exact and fuzzy matching:
    /// affirmative keywords are scanned in configured order, then negative
    /// keywords. Returns the matched keyword for diagnostics.
    pub fn containment_match(&self, text: &str) -> Option<(Intent, &str)> {
        for keyword in &self.affirmative {
            if text.contains(keyword.as_str()) {
                return Some((Intent::Affirmative, keyword.as_str()));
            }
        }
        for keyword in &self.negative {
            if text.contains(keyword.as_str()) {
                return Some((Intent::Negative, keyword.as_str()));
            }
        }
        None
    }

    /// Affirmative keywords in configured scan order.
    pub fn affirmative(&self) -> &[String] {
        &self.affirmative
    }

    /// Negative keywords in configured scan order.
    pub fn negative(&self) -> &[String] {
        &self.negative
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> Lexicon {
        Lexicon::new(
            vec!["好的".to_string(), "OK".to_string(), "开始".to_string()],
            vec!["不要".to_string(), "取消".to_string()],
        )
        .unwrap()
    }

    #[test]
    fn test_exact_match_case_insensitive() {
        let lex = lexicon();
        assert_eq!(lex.exact_match("ok"), Some(Intent::Affirmative));
        assert_eq!(lex.exact_match("OK"), Some(Intent::Affirmative));
        assert_eq!(lex.exact_match("好的"), Some(Intent::Affirmative));
        assert_eq!(lex.exact_match("取消"), Some(Intent::Negative));
        assert_eq!(lex.exact_match("随便"), None);
    }

    #[test]
    fn test_affirmative_wins_cross_set_overlap() {
        // Overlap across sets is tolerated; the affirmative pass runs first.
        let lex = Lexicon::new(
            vec!["行".to_string()],
            vec!["行".to_string(), "不要".to_string()],
        )
        .unwrap();
        assert_eq!(lex.exact_match("行"), Some(Intent::Affirmative));
    }

    #[test]
    fn test_duplicate_within_set_rejected() {
        let result = Lexicon::new(
            vec!["好的".to_string(), "好的".to_string()],
            vec![],
        );
        assert!(matches!(result, Err(AssentError::Configuration(_))));

        // Case-insensitive duplicate.
        let result = Lexicon::new(vec!["OK".to_string(), "ok".to_string()], vec![]);
        assert!(matches!(result, Err(AssentError::Configuration(_))));
    }

    #[test]
    fn test_empty_keyword_rejected() {
        let result = Lexicon::new(vec!["  ".to_string()], vec![]);
        assert!(matches!(result, Err(AssentError::Configuration(_))));
    }

    #[test]
    fn test_containment_scans_affirmative_first() {
        let lex = lexicon();
        // "开始" is contained even though the whole text is not a keyword.
        assert_eq!(
            lex.containment_match("马上开始烹饪"),
            Some((Intent::Affirmative, "开始"))
        );
        assert_eq!(
            lex.containment_match("帮我取消这个"),
            Some((Intent::Negative, "取消"))
        );
        assert_eq!(lex.containment_match("随便啦"), None);
    }
}
