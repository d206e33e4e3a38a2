//! Mapping of keywords and mood presets to upstream place types.

use serde::{Deserialize, Serialize};

/// A named preset the user can pick instead of typing a keyword.
///
/// A preset only selects place categories. It carries no filter overrides;
/// rating, price and open-now filters always come from the request itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mood {
    Work,
    Date,
    QuickBite,
    Budget,
    /// Any preset name this build does not know about.
    #[serde(other)]
    Other,
}

impl Mood {
    /// Parse a preset name, mapping unknown names to [`Mood::Other`].
    pub fn parse(name: &str) -> Self {
        match name.trim() {
            "work" => Mood::Work,
            "date" => Mood::Date,
            "quickBite" => Mood::QuickBite,
            "budget" => Mood::Budget,
            _ => Mood::Other,
        }
    }

    /// Default place types for this preset.
    pub fn default_types(self) -> &'static [&'static str] {
        match self {
            Mood::Work => &["cafe"],
            Mood::Date => &["restaurant"],
            Mood::QuickBite => &["meal_takeaway", "restaurant"],
            Mood::Budget => &["restaurant"],
            Mood::Other => &["restaurant"],
        }
    }
}

/// A keyword rule: any listed substring selects the listed types.
#[derive(Debug, Clone, Copy)]
pub struct TypeRule {
    pub keywords: &'static [&'static str],
    pub types: &'static [&'static str],
}

impl TypeRule {
    fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|k| text.contains(k))
    }
}

/// Keyword rules, evaluated top to bottom. The order is part of the contract.
pub const TYPE_RULES: &[TypeRule] = &[
    TypeRule {
        keywords: &["coffee", "cafe", "tea"],
        types: &["cafe"],
    },
    TypeRule {
        keywords: &["pizza", "burger", "biryani", "momos", "food", "restaurant"],
        types: &["restaurant"],
    },
    TypeRule {
        keywords: &["gym", "fitness"],
        types: &["gym"],
    },
    TypeRule {
        keywords: &["hospital", "clinic", "doctor"],
        types: &["hospital"],
    },
    TypeRule {
        keywords: &["medical", "pharmacy", "chemist"],
        types: &["pharmacy"],
    },
    TypeRule {
        keywords: &["atm", "bank"],
        types: &["atm"],
    },
    TypeRule {
        keywords: &["petrol", "gas", "pump"],
        types: &["gas_station"],
    },
    TypeRule {
        keywords: &["mall", "shopping"],
        types: &["shopping_mall"],
    },
    TypeRule {
        keywords: &["salon", "barber", "spa"],
        types: &["beauty_salon"],
    },
    TypeRule {
        keywords: &["hotel", "stay", "room"],
        types: &["lodging"],
    },
    TypeRule {
        keywords: &["school", "college"],
        types: &["school"],
    },
    TypeRule {
        keywords: &["park", "garden"],
        types: &["park"],
    },
];

/// Find the first keyword rule matching `keyword`, if any.
pub fn match_keyword(keyword: &str) -> Option<&'static TypeRule> {
    let text = keyword.trim().to_lowercase();
    if text.is_empty() {
        return None;
    }
    TYPE_RULES.iter().find(|rule| rule.matches(&text))
}

/// Resolve the place types to send upstream.
///
/// A keyword that hits a rule wins; otherwise the mood's defaults apply.
/// The result is never empty.
pub fn resolve_included_types(mood: Option<Mood>, keyword: Option<&str>) -> Vec<String> {
    let types = keyword
        .and_then(match_keyword)
        .map(|rule| rule.types)
        .unwrap_or_else(|| mood.unwrap_or(Mood::Other).default_types());

    types.iter().map(|t| t.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_first_match_wins() {
        assert_eq!(
            resolve_included_types(None, Some("chicken biryani")),
            vec!["restaurant"]
        );
        // "tea" (cafe rule) appears before "stay" (lodging rule)
        assert_eq!(
            resolve_included_types(None, Some("tea stay")),
            vec!["cafe"]
        );
        // "spa" and "garden" both match; salon rule comes first
        assert_eq!(
            resolve_included_types(None, Some("spa garden")),
            vec!["beauty_salon"]
        );
    }

    #[test]
    fn test_keyword_is_trimmed_and_lowercased() {
        assert_eq!(
            resolve_included_types(Some(Mood::Date), Some("  Coffee Shop  ")),
            vec!["cafe"]
        );
        assert_eq!(resolve_included_types(None, Some("GYM")), vec!["gym"]);
    }

    #[test]
    fn test_substring_matching() {
        // "steakhouse" contains "tea"
        assert_eq!(resolve_included_types(None, Some("steakhouse")), vec!["cafe"]);
        assert_eq!(
            resolve_included_types(None, Some("gas station")),
            vec!["gas_station"]
        );
        assert_eq!(
            resolve_included_types(None, Some("chemist nearby")),
            vec!["pharmacy"]
        );
    }

    #[test]
    fn test_every_rule_reachable() {
        for rule in TYPE_RULES {
            let first = rule.keywords[0];
            let hit = match_keyword(first).unwrap();
            // Earlier rules may shadow a keyword; the first keyword of each rule must not be shadowed.
            assert_eq!(hit.types, rule.types, "keyword {}", first);
        }
    }

    #[test]
    fn test_unmatched_keyword_falls_back_to_mood() {
        assert_eq!(
            resolve_included_types(Some(Mood::Work), Some("xyz")),
            vec!["cafe"]
        );
        assert_eq!(
            resolve_included_types(Some(Mood::QuickBite), None),
            vec!["meal_takeaway", "restaurant"]
        );
    }

    #[test]
    fn test_empty_keyword_uses_mood() {
        assert_eq!(
            resolve_included_types(Some(Mood::Work), Some("   ")),
            vec!["cafe"]
        );
        assert_eq!(
            resolve_included_types(Some(Mood::Budget), Some("")),
            vec!["restaurant"]
        );
    }

    #[test]
    fn test_unknown_mood_defaults_to_restaurant() {
        assert_eq!(
            resolve_included_types(Some(Mood::Other), None),
            vec!["restaurant"]
        );
        assert_eq!(resolve_included_types(None, None), vec!["restaurant"]);
    }

    #[test]
    fn test_mood_parse() {
        assert_eq!(Mood::parse("work"), Mood::Work);
        assert_eq!(Mood::parse("quickBite"), Mood::QuickBite);
        assert_eq!(Mood::parse("party"), Mood::Other);
    }

    #[test]
    fn test_mood_deserialize_unknown() {
        let mood: Mood = serde_json::from_str("\"quickBite\"").unwrap();
        assert_eq!(mood, Mood::QuickBite);
        let mood: Mood = serde_json::from_str("\"brunch\"").unwrap();
        assert_eq!(mood, Mood::Other);
    }
}
