// SPDX-FileCopyrightText: 2026 Action Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyword-based classification of inbound messages.
//!
//! Maps a message's subject and body to a [`Category`] and an
//! [`ActionType`] using ordered keyword rules. Pure and deterministic:
//! no I/O, no network, no latency.
//!
//! Rule order is load-bearing. Categories are not mutually exclusive in
//! content ("urgent volunteer request" matches both Urgent and Volunteer
//! keywords), so precedence is expressed as an explicit ordered rule
//! table evaluated first-match in a single loop rather than as implicit
//! control flow. Matching is lowercase substring, not word-boundary:
//! "response" inside "correspondence" matches, which is the established
//! behavior downstream consumers depend on.

use acthub_core::{ActionType, Category};

/// One classification rule: label plus the keywords that select it.
struct Rule<L> {
    label: L,
    keywords: &'static [&'static str],
}

/// Category rules, evaluated in order; first match wins.
const CATEGORY_RULES: &[Rule<Category>] = &[
    Rule {
        label: Category::Urgent,
        keywords: &["urgent", "emergency", "asap"],
    },
    Rule {
        label: Category::SocialMedia,
        keywords: &["social media", "facebook", "twitter", "linkedin", "share on"],
    },
    Rule {
        label: Category::EmailAction,
        keywords: &["please respond", "response needed", "please reply"],
    },
    Rule {
        label: Category::Volunteer,
        keywords: &["volunteer", "volunteering", "volunteers needed"],
    },
    Rule {
        label: Category::Events,
        keywords: &["event", "meeting", "schedule", "calendar"],
    },
];

/// Action-type rules. Note the order differs from the category table:
/// technical-support keywords are checked before anything else.
const ACTION_RULES: &[Rule<ActionType>] = &[
    Rule {
        label: ActionType::TechnicalSupport,
        keywords: &["error", "issue", "problem", "not working", "broken", "fix"],
    },
    Rule {
        label: ActionType::SocialShare,
        keywords: &["share", "post on", "share this", "post this"],
    },
    Rule {
        label: ActionType::EmailResponse,
        keywords: &["please respond", "response needed", "please reply"],
    },
    Rule {
        label: ActionType::VolunteerRequest,
        keywords: &["volunteer", "volunteering", "volunteers needed"],
    },
    Rule {
        label: ActionType::EventCoordination,
        keywords: &["event", "meeting", "schedule", "calendar"],
    },
];

/// The two labels assigned to a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    pub action_type: ActionType,
}

/// Classify a message by subject and body.
///
/// Returns the label of the first rule with any keyword present in the
/// lowercased subject or body; `General`/`general` when nothing matches.
pub fn classify(subject: &str, body: &str) -> Classification {
    let subject = subject.to_lowercase();
    let body = body.to_lowercase();

    Classification {
        category: first_match(CATEGORY_RULES, &subject, &body).unwrap_or(Category::General),
        action_type: first_match(ACTION_RULES, &subject, &body).unwrap_or(ActionType::General),
    }
}

fn first_match<L: Copy>(rules: &[Rule<L>], subject: &str, body: &str) -> Option<L> {
    rules
        .iter()
        .find(|rule| {
            rule.keywords
                .iter()
                .any(|kw| subject.contains(kw) || body.contains(kw))
        })
        .map(|rule| rule.label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_is_deterministic() {
        let pairs = [
            ("URGENT: help", "the site is down"),
            ("Hi", "let's meet for coffee"),
            ("Volunteers needed", "please share this on facebook"),
        ];
        for (subject, body) in pairs {
            let first = classify(subject, body);
            for _ in 0..3 {
                assert_eq!(classify(subject, body), first);
            }
        }
    }

    #[test]
    fn urgent_takes_precedence_over_volunteer() {
        // Body matches both the Urgent and Volunteer keyword sets; the
        // Urgent rule is evaluated first.
        let c = classify("weekend plans", "urgent: volunteers needed for saturday");
        assert_eq!(c.category, Category::Urgent);
        assert_eq!(c.action_type, ActionType::VolunteerRequest);
    }

    #[test]
    fn no_keywords_falls_back_to_general() {
        let c = classify("Hi", "Let's meet for coffee");
        assert_eq!(c.category, Category::General);
        assert_eq!(c.action_type, ActionType::General);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let c = classify("EMERGENCY", "");
        assert_eq!(c.category, Category::Urgent);
        let c = classify("", "Please RESPOND by Friday");
        assert_eq!(c.category, Category::EmailAction);
    }

    #[test]
    fn matching_is_substring_not_word_boundary() {
        // "event" inside "eventually" and "share" inside "shareholder"
        // both count as hits. Compatibility behavior, preserved on purpose.
        let c = classify("", "we will eventually mail the shareholder letters");
        assert_eq!(c.category, Category::Events);
        assert_eq!(c.action_type, ActionType::SocialShare);
    }

    #[test]
    fn category_and_action_tables_diverge() {
        // "error ... fix" selects technical_support before the action
        // table ever reaches email/volunteer rules, while the category
        // table classifies the same text as Urgent via "asap".
        let c = classify("URGENT: site down", "error on checkout, please fix asap");
        assert_eq!(c.category, Category::Urgent);
        assert_eq!(c.action_type, ActionType::TechnicalSupport);
    }

    #[test]
    fn subject_only_keywords_match() {
        let c = classify("Please share on LinkedIn", "no keywords here at all");
        assert_eq!(c.category, Category::SocialMedia);
        assert_eq!(c.action_type, ActionType::SocialShare);
    }

    #[test]
    fn events_rule_matches_schedule_and_calendar() {
        assert_eq!(
            classify("", "can we put this on the calendar?").category,
            Category::Events
        );
        assert_eq!(
            classify("schedule change", "").action_type,
            ActionType::EventCoordination
        );
    }

    #[test]
    fn volunteer_category_with_social_action() {
        // Category tables and action tables are independent axes.
        let c = classify("Volunteering opportunity", "please post this everywhere");
        assert_eq!(c.category, Category::Volunteer);
        assert_eq!(c.action_type, ActionType::SocialShare);
    }

    #[test]
    fn empty_input_is_general() {
        let c = classify("", "");
        assert_eq!(c.category, Category::General);
        assert_eq!(c.action_type, ActionType::General);
    }
}
