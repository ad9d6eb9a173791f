//! Templated insights surfaced in response to a directive.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::classify::{classify, DirectiveCategory};

/// Qualitative impact label.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Moderate,
    Monitoring,
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Impact::High => "high",
            Impact::Moderate => "moderate",
            Impact::Monitoring => "monitoring",
        })
    }
}

/// A surfaced observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentInsight {
    pub title: String,
    pub category: DirectiveCategory,
    pub detail: String,
    pub impact: Impact,
}

/// Static insight template.
///
/// `detail` may contain `{directive}`, replaced with the trimmed directive.
/// `fallback` is used verbatim when the directive is blank.
#[derive(Debug, Clone, Copy)]
pub struct InsightTemplate {
    pub title: &'static str,
    pub detail: &'static str,
    pub fallback: &'static str,
    pub impact: Impact,
}

impl InsightTemplate {
    fn render(&self, category: DirectiveCategory, directive: &str) -> AgentInsight {
        let detail = if directive.is_empty() {
            self.fallback.to_string()
        } else {
            self.detail.replace("{directive}", directive)
        };
        AgentInsight {
            title: self.title.to_string(),
            category,
            detail,
            impact: self.impact,
        }
    }
}

const PERFORMANCE: &[InsightTemplate] = &[
    InsightTemplate {
        title: "Core Web Vitals under watch",
        detail: "Profiling render path for \"{directive}\"; LCP and INP budgets will be re-baselined after the fix ships.",
        fallback: "LCP and INP budgets are being tracked against the last lighthouse baseline.",
        impact: Impact::High,
    },
    InsightTemplate {
        title: "Asset weight audit",
        detail: "Scanning images and bundles touched by \"{directive}\" for oversized payloads.",
        fallback: "Image and bundle payloads are within budget on monitored pages.",
        impact: Impact::Moderate,
    },
];

const SEO: &[InsightTemplate] = &[
    InsightTemplate {
        title: "Search visibility check",
        detail: "Comparing indexed pages and rankings for \"{directive}\" against last week's crawl.",
        fallback: "Indexed page count is stable against last week's crawl.",
        impact: Impact::High,
    },
    InsightTemplate {
        title: "Sitemap drift",
        detail: "Verifying sitemap.xml covers every URL referenced by \"{directive}\".",
        fallback: "sitemap.xml matches the routes currently deployed.",
        impact: Impact::Moderate,
    },
];

const ACCESSIBILITY: &[InsightTemplate] = &[
    InsightTemplate {
        title: "Accessibility regression scan",
        detail: "Running axe checks on components named in \"{directive}\"; aria and contrast violations will be grouped by template.",
        fallback: "Automated axe checks report no new violations.",
        impact: Impact::High,
    },
    InsightTemplate {
        title: "Keyboard path review",
        detail: "Tracing focus order for flows affected by \"{directive}\".",
        fallback: "Focus order on primary flows is unchanged since the last sweep.",
        impact: Impact::Moderate,
    },
];

const CONTENT: &[InsightTemplate] = &[
    InsightTemplate {
        title: "Content freshness sweep",
        detail: "Flagging pages related to \"{directive}\" that have not been edited in six months.",
        fallback: "No pages crossed the six-month freshness threshold today.",
        impact: Impact::Moderate,
    },
];

const DEVOPS: &[InsightTemplate] = &[
    InsightTemplate {
        title: "Release pipeline health",
        detail: "Reviewing recent pipeline runs and deploys relevant to \"{directive}\".",
        fallback: "Recent pipeline runs completed without retries.",
        impact: Impact::Moderate,
    },
    InsightTemplate {
        title: "Credential hygiene",
        detail: "Auditing keys and secrets in scope for \"{directive}\" against the 90-day rotation policy.",
        fallback: "All tracked credentials are inside the 90-day rotation window.",
        impact: Impact::High,
    },
];

const GENERAL: &[InsightTemplate] = &[
    InsightTemplate {
        title: "Maintenance loop steady",
        detail: "\"{directive}\" did not map to a maintenance area; continuing scheduled checks.",
        fallback: "No directive received; nightly lighthouse, crawl and accessibility checks continue on schedule.",
        impact: Impact::Monitoring,
    },
    InsightTemplate {
        title: "Backlog triage",
        detail: "Existing roadmap already covers \"{directive}\"; review blocked items first.",
        fallback: "Blocked and high-priority items are surfaced first on the board.",
        impact: Impact::Monitoring,
    },
];

/// Template list for a category, in display order.
pub fn templates_for(category: DirectiveCategory) -> &'static [InsightTemplate] {
    match category {
        DirectiveCategory::Performance => PERFORMANCE,
        DirectiveCategory::Seo => SEO,
        DirectiveCategory::Accessibility => ACCESSIBILITY,
        DirectiveCategory::Content => CONTENT,
        DirectiveCategory::Devops => DEVOPS,
        DirectiveCategory::General => GENERAL,
    }
}

/// Render the insights for an already classified directive.
pub fn insights_for(category: DirectiveCategory, text: &str) -> Vec<AgentInsight> {
    let directive = text.trim();
    templates_for(category)
        .iter()
        .map(|template| template.render(category, directive))
        .collect()
}

/// Classify `text` and render its category's insights. Never empty.
pub fn generate_insights(text: &str) -> Vec<AgentInsight> {
    insights_for(classify(text), text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_CATEGORIES: [DirectiveCategory; 6] = [
        DirectiveCategory::Performance,
        DirectiveCategory::Seo,
        DirectiveCategory::Accessibility,
        DirectiveCategory::Content,
        DirectiveCategory::Devops,
        DirectiveCategory::General,
    ];

    #[test]
    fn test_empty_directive_has_baseline_insights() {
        let insights = generate_insights("");
        assert!(!insights.is_empty());
        assert!(insights.iter().all(|i| i.category == DirectiveCategory::General));
        assert_eq!(insights[0].detail, GENERAL[0].fallback);
    }

    #[test]
    fn test_every_category_has_templates() {
        for category in ALL_CATEGORIES {
            let count = templates_for(category).len();
            assert!((1..=3).contains(&count), "{category}: {count}");
        }
    }

    #[test]
    fn test_directive_is_interpolated() {
        let insights = generate_insights("  investigate SEO drop for /docs  ");
        assert_eq!(insights.len(), SEO.len());
        assert!(insights[0].detail.contains("\"investigate SEO drop for /docs\""));
        assert!(insights.iter().all(|i| i.category == DirectiveCategory::Seo));
    }

    #[test]
    fn test_order_and_impact_follow_templates() {
        let insights = generate_insights("rotate credentials");
        let titles: Vec<_> = insights.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Release pipeline health", "Credential hygiene"]);
        assert_eq!(insights[0].impact, Impact::Moderate);
        assert_eq!(insights[1].impact, Impact::High);
    }

    #[test]
    fn test_no_placeholder_left_behind() {
        for category in ALL_CATEGORIES {
            for insight in insights_for(category, "x") {
                assert!(!insight.detail.contains("{directive}"));
            }
            for insight in insights_for(category, "") {
                assert!(!insight.detail.contains("{directive}"));
            }
        }
    }
}
