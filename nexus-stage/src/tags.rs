//! Diagnostic tag classification.
//!
//! Tags are assigned by an ordered rule table evaluated top to bottom; the
//! first matching rule wins and the last rule always matches.

use tracing::trace;

use crate::types::CategoryTag;

/// Signals a tag rule looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagInputs {
    pub precision: u32,
    pub confidence: u32,
    pub nsp_rate: u32,
    pub bases_fragiles: bool,
}

/// One row of the tag table.
#[derive(Debug, Clone, Copy)]
pub struct TagRule {
    pub name: &'static str,
    pub matches: fn(&TagInputs) -> bool,
    pub tag: CategoryTag,
}

/// Tag rules in priority order.
///
/// The two trailing `Confusions` rows are kept distinct: the guarded one
/// and the unconditional fallthrough yield the same tag.
pub const TAG_RULES: &[TagRule] = &[
    TagRule {
        name: "bases_fragiles",
        matches: |i| i.bases_fragiles,
        tag: CategoryTag::BasesFragiles,
    },
    TagRule {
        name: "mostly_unanswered",
        matches: |i| i.nsp_rate > 60,
        tag: CategoryTag::ADecouvrir,
    },
    TagRule {
        name: "partly_unanswered",
        matches: |i| i.nsp_rate > 40,
        tag: CategoryTag::NotionNonAbordee,
    },
    TagRule {
        name: "mastered",
        matches: |i| i.precision >= 80 && i.confidence >= 60,
        tag: CategoryTag::Maitrise,
    },
    TagRule {
        name: "progressing",
        matches: |i| i.precision >= 50 && i.confidence >= 40,
        tag: CategoryTag::EnProgression,
    },
    TagRule {
        name: "insufficient",
        matches: |i| i.precision < 30 && i.confidence > 30,
        tag: CategoryTag::Insuffisant,
    },
    TagRule {
        name: "confused",
        matches: |i| i.confidence > 30,
        tag: CategoryTag::Confusions,
    },
    TagRule {
        name: "fallthrough",
        matches: |_| true,
        tag: CategoryTag::Confusions,
    },
];

/// First rule of [`TAG_RULES`] matching `inputs`.
pub fn matching_rule(inputs: &TagInputs) -> &'static TagRule {
    TAG_RULES
        .iter()
        .find(|rule| (rule.matches)(inputs))
        .unwrap_or(&TAG_RULES[TAG_RULES.len() - 1])
}

/// Tag for a category given its precision, confidence, NSP rate and whether
/// the Bases-Fragiles pattern was detected.
pub fn compute_category_tag(
    precision: u32,
    confidence: u32,
    nsp_rate: u32,
    has_bases_fragiles: bool,
) -> CategoryTag {
    let inputs = TagInputs {
        precision,
        confidence,
        nsp_rate,
        bases_fragiles: has_bases_fragiles,
    };
    let rule = matching_rule(&inputs);
    trace!(rule = rule.name, tag = %rule.tag, ?inputs, "category tag");
    rule.tag
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule_named(name: &str) -> &'static TagRule {
        TAG_RULES.iter().find(|r| r.name == name).unwrap()
    }

    #[test]
    fn bases_fragiles_overrides_every_other_rule() {
        assert_eq!(
            compute_category_tag(100, 100, 0, true),
            CategoryTag::BasesFragiles
        );
        assert_eq!(
            compute_category_tag(0, 0, 100, true),
            CategoryTag::BasesFragiles
        );
    }

    #[test]
    fn high_nsp_rate_means_a_discovery_topic() {
        assert_eq!(compute_category_tag(100, 39, 61, false), CategoryTag::ADecouvrir);
        assert_eq!(compute_category_tag(0, 0, 100, false), CategoryTag::ADecouvrir);
    }

    #[test]
    fn moderate_nsp_rate_means_notion_not_covered() {
        assert_eq!(
            compute_category_tag(100, 40, 60, false),
            CategoryTag::NotionNonAbordee
        );
        assert_eq!(
            compute_category_tag(100, 59, 41, false),
            CategoryTag::NotionNonAbordee
        );
    }

    #[test]
    fn nsp_rate_of_exactly_forty_falls_through_to_precision_rules() {
        assert_eq!(compute_category_tag(80, 60, 40, false), CategoryTag::Maitrise);
    }

    #[test]
    fn mastered_requires_precision_and_confidence() {
        assert_eq!(compute_category_tag(80, 60, 0, false), CategoryTag::Maitrise);
        assert_eq!(
            compute_category_tag(79, 100, 0, false),
            CategoryTag::EnProgression
        );
    }

    #[test]
    fn progressing_band() {
        assert_eq!(
            compute_category_tag(50, 40, 0, false),
            CategoryTag::EnProgression
        );
        assert_eq!(
            compute_category_tag(90, 50, 0, false),
            CategoryTag::EnProgression
        );
    }

    #[test]
    fn low_precision_with_attempts_is_insufficient() {
        assert_eq!(compute_category_tag(29, 31, 0, false), CategoryTag::Insuffisant);
        assert_eq!(compute_category_tag(0, 100, 0, false), CategoryTag::Insuffisant);
    }

    #[test]
    fn middling_precision_is_confusions() {
        assert_eq!(compute_category_tag(40, 100, 0, false), CategoryTag::Confusions);
        assert_eq!(compute_category_tag(49, 60, 0, false), CategoryTag::Confusions);
    }

    #[test]
    fn low_confidence_falls_through_to_confusions() {
        assert_eq!(compute_category_tag(0, 30, 0, false), CategoryTag::Confusions);
        assert_eq!(
            matching_rule(&TagInputs {
                precision: 0,
                confidence: 30,
                nsp_rate: 0,
                bases_fragiles: false,
            })
            .name,
            "fallthrough"
        );
    }

    #[test]
    fn each_rule_matches_its_own_region() {
        let cases = [
            ("bases_fragiles", (0, 0, 0, true)),
            ("mostly_unanswered", (0, 0, 61, false)),
            ("partly_unanswered", (0, 0, 41, false)),
            ("mastered", (80, 60, 0, false)),
            ("progressing", (50, 40, 0, false)),
            ("insufficient", (10, 31, 0, false)),
            ("confused", (40, 31, 0, false)),
            ("fallthrough", (40, 30, 0, false)),
        ];

        for (name, (precision, confidence, nsp_rate, bases_fragiles)) in cases {
            let inputs = TagInputs {
                precision,
                confidence,
                nsp_rate,
                bases_fragiles,
            };
            assert_eq!(matching_rule(&inputs).name, name, "inputs: {inputs:?}");
            assert!((rule_named(name).matches)(&inputs));
        }
    }

    #[test]
    fn last_rule_always_matches() {
        let last = TAG_RULES.last().unwrap();
        assert!((last.matches)(&TagInputs {
            precision: 0,
            confidence: 0,
            nsp_rate: 0,
            bases_fragiles: false,
        }));
    }
}
