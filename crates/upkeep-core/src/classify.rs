//! Keyword-table directive classification.
//!
//! The table is data, evaluated in fixed priority order; the first category
//! with any keyword present in the lower-cased text wins.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace};

use crate::task::TaskCategory;

/// Category a directive is routed to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DirectiveCategory {
    Performance,
    Seo,
    Accessibility,
    Content,
    Devops,
    /// No keyword matched, or the directive was blank
    General,
}

impl DirectiveCategory {
    /// The task category work of this kind is filed under, if any.
    pub fn task_category(&self) -> Option<TaskCategory> {
        match self {
            DirectiveCategory::Performance => Some(TaskCategory::Performance),
            DirectiveCategory::Seo => Some(TaskCategory::Seo),
            DirectiveCategory::Accessibility => Some(TaskCategory::Accessibility),
            DirectiveCategory::Content => Some(TaskCategory::Content),
            DirectiveCategory::Devops => Some(TaskCategory::Devops),
            DirectiveCategory::General => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self.task_category() {
            Some(category) => category.as_str(),
            None => "general",
        }
    }
}

impl From<TaskCategory> for DirectiveCategory {
    fn from(category: TaskCategory) -> Self {
        match category {
            TaskCategory::Performance => DirectiveCategory::Performance,
            TaskCategory::Seo => DirectiveCategory::Seo,
            TaskCategory::Accessibility => DirectiveCategory::Accessibility,
            TaskCategory::Content => DirectiveCategory::Content,
            TaskCategory::Devops => DirectiveCategory::Devops,
        }
    }
}

impl fmt::Display for DirectiveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered keyword table. Earlier rows take precedence.
pub const KEYWORD_TABLE: &[(DirectiveCategory, &[&str])] = &[
    (
        DirectiveCategory::Performance,
        &["performance", "slow", "latency", "lcp", "speed", "vitals", "lighthouse"],
    ),
    (
        DirectiveCategory::Seo,
        &["seo", "sitemap", "search", "ranking", "backlink"],
    ),
    (
        DirectiveCategory::Accessibility,
        &["accessibility", "a11y", "aria", "contrast", "keyboard", "screen reader"],
    ),
    (
        DirectiveCategory::Content,
        &["content", "copy", "freshness", "stale", "editorial"],
    ),
    (
        DirectiveCategory::Devops,
        &["deploy", "pipeline", "credential", "rotate", "key", "secret"],
    ),
];

/// Find the first table row with a keyword in `text`, and the keyword itself.
pub fn matched_keyword(text: &str) -> Option<(DirectiveCategory, &'static str)> {
    let lowered = text.trim().to_lowercase();
    if lowered.is_empty() {
        return None;
    }

    KEYWORD_TABLE.iter().find_map(|(category, keywords)| {
        keywords
            .iter()
            .find(|kw| lowered.contains(*kw))
            .map(|kw| (*category, *kw))
    })
}

/// Classify a directive. Blank or unmatched text is `General`.
pub fn classify(text: &str) -> DirectiveCategory {
    match matched_keyword(text) {
        Some((category, keyword)) => {
            trace!(%category, keyword, "directive keyword matched");
            category
        }
        None => {
            debug!("directive matched no keyword, using general");
            DirectiveCategory::General
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_is_general() {
        assert_eq!(classify(""), DirectiveCategory::General);
        assert_eq!(classify("   \n\t"), DirectiveCategory::General);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("SEO sitemap"), classify("seo sitemap"));
        assert_eq!(classify("SEO sitemap"), DirectiveCategory::Seo);
        assert_eq!(classify("Fix LCP"), DirectiveCategory::Performance);
    }

    #[test]
    fn test_accessibility_keywords() {
        assert_eq!(classify("fix aria labels"), DirectiveCategory::Accessibility);
        assert_eq!(classify("check colour contrast on buttons"), DirectiveCategory::Accessibility);
        assert_eq!(classify("Keyboard traps in the modal"), DirectiveCategory::Accessibility);
    }

    #[test]
    fn test_first_match_wins() {
        // Both performance and seo keywords present; performance is checked first.
        assert_eq!(
            classify("search page is slow"),
            DirectiveCategory::Performance
        );
        // "keyboard" hits accessibility before devops' "key".
        assert_eq!(classify("keyboard"), DirectiveCategory::Accessibility);
    }

    #[test]
    fn test_substring_match() {
        assert_eq!(classify("redeployment failed"), DirectiveCategory::Devops);
    }

    #[test]
    fn test_unmatched_is_general() {
        assert_eq!(classify("everything looks fine"), DirectiveCategory::General);
    }

    #[test]
    fn test_every_keyword_routes_to_its_row() {
        for (category, keywords) in KEYWORD_TABLE {
            for kw in *keywords {
                assert_eq!(classify(kw), *category, "keyword {kw:?}");
                assert_eq!(classify(&kw.to_uppercase()), *category, "keyword {kw:?}");
            }
        }
    }

    #[test]
    fn test_matched_keyword_reports_trigger() {
        assert_eq!(
            matched_keyword("Rotate the staging credentials"),
            Some((DirectiveCategory::Devops, "credential"))
        );
        assert_eq!(matched_keyword("hello"), None);
    }

    #[test]
    fn test_task_category_mapping() {
        assert_eq!(DirectiveCategory::General.task_category(), None);
        for category in TaskCategory::ALL {
            assert_eq!(DirectiveCategory::from(category).task_category(), Some(category));
            assert_eq!(DirectiveCategory::from(category).as_str(), category.as_str());
        }
    }
}
