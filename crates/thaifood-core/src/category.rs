//! # Category Resolution
//!
//! Assigns every menu item to exactly one [`Category`].
//!
//! ## Priority Cascade (first match wins)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  raw name ──trim──► name                                                │
//! │                                                                         │
//! │  1. Exact-name override   "ชาไทย" ──────────────────────► drink          │
//! │         │ no entry                                                      │
//! │         ▼                                                               │
//! │  2. Numeric hint          category_id 2 ─────────────────► main-course  │
//! │         │ absent / unknown id                                           │
//! │         ▼                                                               │
//! │  3. Keyword rules         lowercase name contains ALL keywords          │
//! │         │ (in list order)  ["ข้าวเหนียว","มะม่วง"] ──────────► dessert   │
//! │         │ no rule matches                                               │
//! │         ▼                                                               │
//! │  4. Default ─────────────────────────────────────────────► appetizer    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The override table exists because the backend spells some dishes several
//! ways and files them under inconsistent `category_id`s. It beats the hint
//! on purpose. Reordering the stages changes classifications.
//!
//! ## Usage
//! ```rust
//! use thaifood_core::category::CategoryResolver;
//! use thaifood_core::types::Category;
//!
//! let resolver = CategoryResolver::builtin();
//!
//! assert_eq!(resolver.resolve("เป๊ปซี่", Some(1)), Category::Drink);
//! assert_eq!(resolver.resolve("แกงเขียวหวาน", Some(2)), Category::MainCourse);
//! assert_eq!(resolver.resolve("ต้มยำปลา", None), Category::MainCourse);
//! assert_eq!(resolver.resolve("ของใหม่", None), Category::Appetizer);
//! ```

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::Category;

// =============================================================================
// Rule Tables
// =============================================================================

/// Exact item name that is always filed under `category`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameOverride {
    pub name: String,
    pub category: Category,
}

/// Backend `category_id` and the category it stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryHint {
    pub id: i64,
    pub category: Category,
}

/// Matches when the lower-cased item name contains every keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub keywords: Vec<String>,
    pub category: Category,
}

/// The three rule tables, as data.
///
/// Deserializable so deployments can ship corrected tables in configuration.
/// `rules` keeps the order it was written in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRules {
    #[serde(default)]
    pub overrides: Vec<NameOverride>,

    #[serde(default)]
    pub hints: Vec<CategoryHint>,

    #[serde(default)]
    pub rules: Vec<KeywordRule>,
}

impl CategoryRules {
    /// The tables the menu ships with.
    pub fn builtin() -> Self {
        use Category::*;

        let overrides = [
            ("หมูสะเต๊ะ", Appetizer),
            ("ไก่ทอดสมุนไพร", Appetizer),
            ("ผัดไทยกุ้งสด", MainCourse),
            ("ต้มยำกุ้ง", MainCourse),
            ("ไข่เจียวปู", MainCourse),
            ("ข้าวเหนียวมะม่วง", Dessert),
            ("ลอดช่อง", Dessert),
            ("ชาไทย", Drink),
            // Pepsi arrives under three spellings.
            ("แป๊ปซี่", Drink),
            ("เป๊ปซี่", Drink),
            ("เป็บซี่", Drink),
        ];

        // 5 is a legacy drinks id still present in some rows.
        let hints = [
            (1, Appetizer),
            (2, MainCourse),
            (3, Dessert),
            (4, Drink),
            (5, Drink),
        ];

        let rules: [(&[&str], Category); 9] = [
            (&["หมูสะเต๊ะ"], Appetizer),
            (&["ไก่ทอด"], Appetizer),
            (&["ผัดไทย"], MainCourse),
            (&["ต้มยำ"], MainCourse),
            (&["ไข่เจียว"], MainCourse),
            (&["ข้าวเหนียว", "มะม่วง"], Dessert),
            (&["ลอดช่อง"], Dessert),
            (&["ชาไทย"], Drink),
            (&["pepsi"], Drink),
        ];

        CategoryRules {
            overrides: overrides
                .into_iter()
                .map(|(name, category)| NameOverride {
                    name: name.to_string(),
                    category,
                })
                .collect(),
            hints: hints
                .into_iter()
                .map(|(id, category)| CategoryHint { id, category })
                .collect(),
            rules: rules
                .into_iter()
                .map(|(keywords, category)| KeywordRule {
                    keywords: keywords.iter().map(|k| k.to_string()).collect(),
                    category,
                })
                .collect(),
        }
    }

    /// Checks that every table entry can be evaluated.
    ///
    /// ## Rules
    /// - Override names must not be blank
    /// - Keyword rules need at least one keyword, and no blank keywords
    pub fn validate(&self) -> CoreResult<()> {
        if self.overrides.iter().any(|o| o.name.trim().is_empty()) {
            return Err(ValidationError::Required {
                field: "override name".to_string(),
            }
            .into());
        }

        for (index, rule) in self.rules.iter().enumerate() {
            if rule.keywords.is_empty() {
                return Err(CoreError::InvalidRule {
                    index,
                    reason: "keyword list is empty".to_string(),
                });
            }
            if rule.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(CoreError::InvalidRule {
                    index,
                    reason: "contains a blank keyword".to_string(),
                });
            }
        }

        Ok(())
    }
}

// =============================================================================
// Resolution Result
// =============================================================================

/// Which stage of the cascade decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedBy {
    Override,
    Hint,
    /// Index of the matching keyword rule.
    Keyword(usize),
    /// Nothing matched; the default category was returned.
    Default,
}

/// A category together with how it was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub category: Category,
    pub source: ResolvedBy,
}

impl Resolution {
    /// True when the category is a guess (default fallback).
    pub fn is_fallback(&self) -> bool {
        self.source == ResolvedBy::Default
    }
}

// =============================================================================
// Resolver
// =============================================================================

#[derive(Debug, Clone)]
struct CompiledRule {
    keywords: Vec<String>,
    category: Category,
}

/// Immutable, compiled rule tables.
///
/// Build once at start-up; resolution is a pure lookup and the resolver is
/// `Send + Sync`.
#[derive(Debug, Clone)]
pub struct CategoryResolver {
    overrides: HashMap<String, Category>,
    hints: HashMap<i64, Category>,
    rules: Vec<CompiledRule>,
    fallback: Category,
}

impl CategoryResolver {
    /// Process-wide resolver over [`CategoryRules::builtin`].
    pub fn builtin() -> &'static CategoryResolver {
        static BUILTIN: OnceLock<CategoryResolver> = OnceLock::new();
        BUILTIN.get_or_init(|| CategoryResolver::compile(CategoryRules::builtin()))
    }

    /// Validates and compiles custom rule tables.
    pub fn from_rules(rules: CategoryRules) -> CoreResult<Self> {
        rules.validate()?;
        Ok(CategoryResolver::compile(rules))
    }

    fn compile(rules: CategoryRules) -> Self {
        let overrides = rules
            .overrides
            .into_iter()
            .map(|o| (o.name.trim().to_string(), o.category))
            .collect();

        let hints = rules.hints.into_iter().map(|h| (h.id, h.category)).collect();

        let rules = rules
            .rules
            .into_iter()
            .map(|r| CompiledRule {
                keywords: r.keywords.iter().map(|k| k.to_lowercase()).collect(),
                category: r.category,
            })
            .collect();

        CategoryResolver {
            overrides,
            hints,
            rules,
            fallback: Category::default(),
        }
    }

    /// Resolves a category. Never fails.
    #[inline]
    pub fn resolve(&self, raw_name: &str, hint: Option<i64>) -> Category {
        self.resolve_detailed(raw_name, hint).category
    }

    /// Resolves a category and reports which stage decided.
    pub fn resolve_detailed(&self, raw_name: &str, hint: Option<i64>) -> Resolution {
        let name = raw_name.trim();

        if let Some(&category) = self.overrides.get(name) {
            trace!(item = name, %category, "Category from name override");
            return Resolution {
                category,
                source: ResolvedBy::Override,
            };
        }

        if let Some(&category) = hint.and_then(|id| self.hints.get(&id)) {
            trace!(item = name, ?hint, %category, "Category from backend hint");
            return Resolution {
                category,
                source: ResolvedBy::Hint,
            };
        }

        let lowered = name.to_lowercase();
        for (index, rule) in self.rules.iter().enumerate() {
            if rule.keywords.iter().all(|k| lowered.contains(k.as_str())) {
                trace!(item = name, rule = index, category = %rule.category, "Category from keyword rule");
                return Resolution {
                    category: rule.category,
                    source: ResolvedBy::Keyword(index),
                };
            }
        }

        debug!(item = name, ?hint, category = %self.fallback, "No category rule matched, using default");
        Resolution {
            category: self.fallback,
            source: ResolvedBy::Default,
        }
    }
}

impl Default for CategoryResolver {
    fn default() -> Self {
        CategoryResolver::builtin().clone()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> &'static CategoryResolver {
        CategoryResolver::builtin()
    }

    #[test]
    fn test_builtin_rules_are_valid() {
        assert!(CategoryRules::builtin().validate().is_ok());
    }

    #[test]
    fn test_override_table() {
        assert_eq!(resolver().resolve("หมูสะเต๊ะ", None), Category::Appetizer);
        assert_eq!(resolver().resolve("ข้าวเหนียวมะม่วง", None), Category::Dessert);
        assert_eq!(resolver().resolve("แป๊ปซี่", None), Category::Drink);
        assert_eq!(resolver().resolve("เป็บซี่", None), Category::Drink);
    }

    #[test]
    fn test_override_matches_trimmed_name() {
        let r = resolver().resolve_detailed("  ลอดช่อง \n", Some(1));
        assert_eq!(r.category, Category::Dessert);
        assert_eq!(r.source, ResolvedBy::Override);
    }

    #[test]
    fn test_override_beats_hint() {
        // Backend filed Thai tea under main course.
        let r = resolver().resolve_detailed("ชาไทย", Some(2));
        assert_eq!(r.category, Category::Drink);
        assert_eq!(r.source, ResolvedBy::Override);
    }

    #[test]
    fn test_override_beats_hint_and_unrelated_keyword() {
        let rules = CategoryRules {
            overrides: vec![NameOverride {
                name: "ต้มยำกุ้ง".to_string(),
                category: Category::MainCourse,
            }],
            hints: vec![CategoryHint {
                id: 3,
                category: Category::Dessert,
            }],
            rules: vec![KeywordRule {
                keywords: vec!["กุ้ง".to_string()],
                category: Category::Appetizer,
            }],
        };
        let resolver = CategoryResolver::from_rules(rules).unwrap();

        assert_eq!(resolver.resolve("ต้มยำกุ้ง", Some(3)), Category::MainCourse);
        assert_eq!(resolver.resolve("กุ้งทอด", None), Category::Appetizer);
    }

    #[test]
    fn test_hint_lookup() {
        assert_eq!(resolver().resolve("แกงเขียวหวาน", Some(1)), Category::Appetizer);
        assert_eq!(resolver().resolve("แกงเขียวหวาน", Some(3)), Category::Dessert);
        assert_eq!(resolver().resolve("น้ำมะพร้าว", Some(5)), Category::Drink);
    }

    #[test]
    fn test_hint_beats_keywords() {
        let r = resolver().resolve_detailed("ต้มยำปลา", Some(4));
        assert_eq!(r.category, Category::Drink);
        assert_eq!(r.source, ResolvedBy::Hint);
    }

    #[test]
    fn test_unknown_hint_falls_through_to_keywords() {
        let r = resolver().resolve_detailed("ผัดไทยหมู", Some(99));
        assert_eq!(r.category, Category::MainCourse);
        assert_eq!(r.source, ResolvedBy::Keyword(2));
    }

    #[test]
    fn test_keyword_rules_are_conjunctive() {
        // Only one of the two dessert keywords present.
        assert_eq!(resolver().resolve("ข้าวเหนียวหมูปิ้ง", None), Category::Appetizer);
        assert_eq!(resolver().resolve("มะม่วงน้ำปลาหวาน", None), Category::Appetizer);
        assert!(resolver().resolve_detailed("มะม่วงน้ำปลาหวาน", None).is_fallback());

        // Both present, in a name that is not an exact override.
        let r = resolver().resolve_detailed("ข้าวเหนียวมะม่วงอกร่อง", None);
        assert_eq!(r.category, Category::Dessert);
        assert_eq!(r.source, ResolvedBy::Keyword(5));
    }

    #[test]
    fn test_keyword_match_ignores_case() {
        assert_eq!(resolver().resolve("Pepsi Max", None), Category::Drink);
        assert_eq!(resolver().resolve("PEPSI", None), Category::Drink);
    }

    #[test]
    fn test_first_keyword_rule_wins() {
        let rules = CategoryRules {
            rules: vec![
                KeywordRule {
                    keywords: vec!["ไก่".to_string()],
                    category: Category::MainCourse,
                },
                KeywordRule {
                    keywords: vec!["ไก่".to_string(), "ทอด".to_string()],
                    category: Category::Appetizer,
                },
            ],
            ..CategoryRules::default()
        };
        let resolver = CategoryResolver::from_rules(rules).unwrap();
        assert_eq!(resolver.resolve("ไก่ทอด", None), Category::MainCourse);
    }

    #[test]
    fn test_default_fallback_never_fails() {
        for name in ["", "   ", "ของใหม่", "Burger"] {
            let r = resolver().resolve_detailed(name, None);
            assert_eq!(r.category, Category::Appetizer);
            assert!(r.is_fallback());
        }
    }

    #[test]
    fn test_invalid_rules_rejected() {
        let empty = CategoryRules {
            rules: vec![KeywordRule {
                keywords: vec![],
                category: Category::Drink,
            }],
            ..CategoryRules::default()
        };
        assert!(matches!(
            CategoryResolver::from_rules(empty),
            Err(CoreError::InvalidRule { index: 0, .. })
        ));

        let blank = CategoryRules {
            overrides: vec![NameOverride {
                name: "  ".to_string(),
                category: Category::Drink,
            }],
            ..CategoryRules::default()
        };
        assert!(matches!(
            CategoryResolver::from_rules(blank),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_rules_deserialize_in_written_order() {
        let json = serde_json::json!({
            "rules": [
                { "keywords": ["ส้มตำ"], "category": "appetizer" },
                { "keywords": ["ข้าวผัด"], "category": "main-course" }
            ]
        });
        let rules: CategoryRules = serde_json::from_value(json).unwrap();
        assert!(rules.overrides.is_empty());
        assert_eq!(rules.rules[1].category, Category::MainCourse);

        let resolver = CategoryResolver::from_rules(rules).unwrap();
        assert_eq!(resolver.resolve("ข้าวผัดปู", None), Category::MainCourse);
    }
}
