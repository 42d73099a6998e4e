//! Keyword classification of metric keys
//!
//! Simulator metric names are free-form, so categories are inferred from
//! keywords in the key. The rules live in an ordered table: the first rule
//! whose keyword occurs in the (lower-cased) key decides the category, and
//! its secondary rule decides the sub-flag.

use serde::{Deserialize, Serialize};

/// Primary category of a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Throughput,
    Latency,
    Utilization,
    Unclassified,
}

/// Sub-flag within throughput or latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Secondary {
    Application,
    Network,
    /// Throughput key that names neither side; counted in no throughput mean.
    Unflagged,
    Average,
    Tail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Classification {
    pub category: Category,
    pub secondary: Option<Secondary>,
}

impl Classification {
    pub const UNCLASSIFIED: Classification = Classification {
        category: Category::Unclassified,
        secondary: None,
    };
}

/// How a keyword is looked for in a lower-cased key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// Anywhere in the key
    Substring(&'static str),
    /// As a whole path segment, split on `.`, `_`, `-`, `[` and `]`
    Segment(&'static str),
}

impl Matcher {
    fn matches(&self, key: &str) -> bool {
        match self {
            Matcher::Substring(needle) => key.contains(needle),
            Matcher::Segment(segment) => key
                .split(|c: char| matches!(c, '.' | '_' | '-' | '[' | ']'))
                .any(|s| s == *segment),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecondaryRule {
    None,
    /// First flag with a matching matcher wins, otherwise `fallback`.
    Flags {
        flags: &'static [(Secondary, &'static [Matcher])],
        fallback: Secondary,
    },
}

impl SecondaryRule {
    fn resolve(&self, key: &str) -> Option<Secondary> {
        match self {
            SecondaryRule::None => None,
            SecondaryRule::Flags { flags, fallback } => Some(
                flags
                    .iter()
                    .find(|(_, matchers)| matchers.iter().any(|m| m.matches(key)))
                    .map(|(flag, _)| *flag)
                    .unwrap_or(*fallback),
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationRule {
    pub category: Category,
    /// Lower-case keywords; any one selects this rule.
    pub keywords: &'static [&'static str],
    pub secondary: SecondaryRule,
}

/// Default rule table, in priority order.
pub const CLASSIFICATION_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        category: Category::Throughput,
        keywords: &["throughput"],
        secondary: SecondaryRule::Flags {
            flags: &[
                (Secondary::Application, &[Matcher::Substring("app")]),
                (
                    Secondary::Network,
                    &[Matcher::Substring("network"), Matcher::Segment("net")],
                ),
            ],
            fallback: Secondary::Unflagged,
        },
    },
    ClassificationRule {
        category: Category::Latency,
        keywords: &["latency"],
        secondary: SecondaryRule::Flags {
            flags: &[(
                Secondary::Tail,
                &[Matcher::Substring("tail"), Matcher::Substring("99")],
            )],
            fallback: Secondary::Average,
        },
    },
    ClassificationRule {
        category: Category::Utilization,
        keywords: &["utilization"],
        secondary: SecondaryRule::None,
    },
];

/// Applies an ordered rule table to metric keys.
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    rules: &'static [ClassificationRule],
}

impl Classifier {
    pub const fn new(rules: &'static [ClassificationRule]) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'static [ClassificationRule] {
        self.rules
    }

    pub fn classify(&self, key: &str) -> Classification {
        let key = key.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| key.contains(k)))
            .map(|rule| Classification {
                category: rule.category,
                secondary: rule.secondary.resolve(&key),
            })
            .unwrap_or(Classification::UNCLASSIFIED)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(CLASSIFICATION_RULES)
    }
}

/// Classify `key` with the default rule table.
pub fn classify(key: &str) -> Classification {
    Classifier::default().classify(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn class(category: Category, secondary: Option<Secondary>) -> Classification {
        Classification { category, secondary }
    }

    #[test]
    fn test_throughput_flags() {
        assert_eq!(
            classify("host[3].app.throughput"),
            class(Category::Throughput, Some(Secondary::Application))
        );
        assert_eq!(
            classify("fabric.NetworkThroughput"),
            class(Category::Throughput, Some(Secondary::Network))
        );
        assert_eq!(
            classify("net.throughput.val"),
            class(Category::Throughput, Some(Secondary::Network))
        );
        assert_eq!(
            classify("net_throughput"),
            class(Category::Throughput, Some(Secondary::Network))
        );
        // "app" outranks "network"
        assert_eq!(
            classify("app.networkThroughput"),
            class(Category::Throughput, Some(Secondary::Application))
        );
    }

    #[test]
    fn test_unflagged_throughput() {
        // "ethernet" contains "net" but is not a net segment
        assert_eq!(
            classify("UltraEthernetLink.throughput"),
            class(Category::Throughput, Some(Secondary::Unflagged))
        );
        assert_eq!(
            classify("switch.port[0].throughput"),
            class(Category::Throughput, Some(Secondary::Unflagged))
        );
    }

    #[test]
    fn test_latency_flags() {
        assert_eq!(
            classify("host.app.latency"),
            class(Category::Latency, Some(Secondary::Average))
        );
        assert_eq!(
            classify("host.app.tailLatency"),
            class(Category::Latency, Some(Secondary::Tail))
        );
        assert_eq!(
            classify("host.latency:p99"),
            class(Category::Latency, Some(Secondary::Tail))
        );
    }

    #[test]
    fn test_priority_order() {
        // throughput is checked before latency
        assert_eq!(classify("latency_throughput").category, Category::Throughput);
        assert_eq!(classify("utilization.latency").category, Category::Latency);
        assert_eq!(
            classify("link.linkUtilization"),
            class(Category::Utilization, None)
        );
    }

    #[test]
    fn test_unclassified() {
        assert_eq!(classify("transport.retransmissions"), Classification::UNCLASSIFIED);
        assert_eq!(classify(""), Classification::UNCLASSIFIED);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("APP.THROUGHPUT"), classify("app.throughput"));
    }

    #[test]
    fn test_custom_rules() {
        const RULES: &[ClassificationRule] = &[ClassificationRule {
            category: Category::Utilization,
            keywords: &["occupancy"],
            secondary: SecondaryRule::None,
        }];
        let classifier = Classifier::new(RULES);
        assert_eq!(classifier.classify("inc.bufferOccupancy").category, Category::Utilization);
        assert_eq!(classifier.classify("app.throughput").category, Category::Unclassified);
    }

    proptest! {
        #[test]
        fn test_classification_is_deterministic_and_consistent(key in "[A-Za-z0-9_.\\[\\]]{0,40}") {
            let first = classify(&key);
            prop_assert_eq!(first, classify(&key));

            match first.category {
                Category::Throughput => prop_assert!(matches!(
                    first.secondary,
                    Some(Secondary::Application | Secondary::Network | Secondary::Unflagged)
                )),
                Category::Latency => prop_assert!(matches!(
                    first.secondary,
                    Some(Secondary::Average | Secondary::Tail)
                )),
                Category::Utilization | Category::Unclassified => {
                    prop_assert_eq!(first.secondary, None)
                }
            }
        }
    }
}
