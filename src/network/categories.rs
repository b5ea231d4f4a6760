// Keyword categories — ordered substring rules, first match wins.
//
// The rule table is an explicit ordered list because matching is
// order-dependent: a keyword whose text matches two categories' patterns
// always resolves to the earlier-listed one. Unmatched keywords fall
// through to Other. Patterns match case-normalized substrings of the
// keyword.

use serde::{Deserialize, Serialize};

/// The closed set of keyword categories a node can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Food & Drink")]
    FoodAndDrink,
    #[serde(rename = "Cleanliness")]
    Cleanliness,
    #[serde(rename = "Seating & Space")]
    Seating,
    #[serde(rename = "Interior & Ambience")]
    Ambience,
    #[serde(rename = "Service")]
    Service,
    #[serde(rename = "Social")]
    Social,
    #[serde(rename = "Study & Work")]
    Study,
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::FoodAndDrink => "Food & Drink",
            Category::Cleanliness => "Cleanliness",
            Category::Seating => "Seating & Space",
            Category::Ambience => "Interior & Ambience",
            Category::Service => "Service",
            Category::Social => "Social",
            Category::Study => "Study & Work",
            Category::Other => "Other",
        }
    }

    /// Fixed render color per category, consumed by graph renderers.
    pub fn color(&self) -> &'static str {
        match self {
            Category::FoodAndDrink => "#006241",
            Category::Cleanliness => "#00A862",
            Category::Seating => "#D4B59E",
            Category::Ambience => "#FF8C3A",
            Category::Service => "#1A75CF",
            Category::Social => "#E01931",
            Category::Study => "#9370DB",
            Category::Other => "#767676",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered (category, patterns) rules for keyword classification.
#[derive(Debug, Clone)]
pub struct CategoryRules {
    rules: Vec<(Category, Vec<String>)>,
}

impl Default for CategoryRules {
    fn default() -> Self {
        let rules = [
            (
                Category::FoodAndDrink,
                vec!["tasty", "coffee", "dessert", "menu", "drink", "tea", "portion"],
            ),
            (Category::Cleanliness, vec!["clean", "tidy", "restroom"]),
            (
                Category::Seating,
                vec!["seat", "comfortable", "spot", "spacious", "chair", "roomy"],
            ),
            (
                Category::Ambience,
                vec![
                    "interior", "ambience", "atmosphere", "pretty", "stylish", "view",
                    "photo", "music",
                ],
            ),
            (Category::Service, vec!["friendly", "service", "value"]),
            (Category::Social, vec!["conversation", "chat", "friend"]),
            (Category::Study, vec!["focus", "study", "work", "stay long"]),
        ];
        Self {
            rules: rules
                .into_iter()
                .map(|(c, patterns)| (c, patterns.into_iter().map(String::from).collect()))
                .collect(),
        }
    }
}

impl CategoryRules {
    pub fn new(rules: Vec<(Category, Vec<String>)>) -> Self {
        Self { rules }
    }

    /// Classify a keyword: first rule with a substring match wins.
    pub fn categorize(&self, keyword: &str) -> Category {
        let lowered = keyword.to_lowercase();
        for (category, patterns) in &self.rules {
            if patterns.iter().any(|p| lowered.contains(p.as_str())) {
                return *category;
            }
        }
        Category::Other
    }
}
