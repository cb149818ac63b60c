use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// One constitution the questionnaire can diagnose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub key: String,
    pub display_name: String,
    pub item_indices: Vec<u16>,
    pub advice: String,
}

impl Category {
    pub fn item_count(&self) -> usize {
        self.item_indices.len()
    }
}

/// Validated, immutable category configuration.
///
/// Declaration order is significant: ranking ties are broken in favor of the
/// category declared first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTable {
    balanced_key: String,
    categories: Vec<Category>,
    balanced_index: usize,
}

#[derive(Debug, Deserialize)]
struct RawCategoryTable {
    balanced_key: String,
    categories: Vec<Category>,
}

impl CategoryTable {
    pub fn new(
        balanced_key: impl Into<String>,
        categories: Vec<Category>,
    ) -> Result<Self, CategoryTableError> {
        let balanced_key = balanced_key.into();

        if categories.is_empty() {
            return Err(CategoryTableError::Empty);
        }

        let mut keys = BTreeSet::new();
        for category in &categories {
            if !keys.insert(category.key.as_str()) {
                return Err(CategoryTableError::DuplicateKey(category.key.clone()));
            }
            if category.item_indices.is_empty() {
                return Err(CategoryTableError::EmptyItems(category.key.clone()));
            }

            let mut seen = BTreeSet::new();
            for &index in &category.item_indices {
                if index == 0 {
                    return Err(CategoryTableError::ZeroItemIndex(category.key.clone()));
                }
                if !seen.insert(index) {
                    return Err(CategoryTableError::RepeatedItem {
                        key: category.key.clone(),
                        index,
                    });
                }
            }
        }

        let balanced_index = categories
            .iter()
            .position(|category| category.key == balanced_key)
            .ok_or_else(|| CategoryTableError::MissingBalanced(balanced_key.clone()))?;

        Ok(Self {
            balanced_key,
            categories,
            balanced_index,
        })
    }

    /// Parse and validate a JSON table of the form
    /// `{ "balanced_key": "...", "categories": [ ... ] }`.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, CategoryTableError> {
        let raw: RawCategoryTable = serde_json::from_reader(reader)?;
        Self::new(raw.balanced_key, raw.categories)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CategoryTableError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CategoryTableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_reader(BufReader::new(file))
    }

    /// The nine-constitution table used by the 60-item questionnaire.
    pub fn standard() -> Self {
        let categories: Vec<Category> = STANDARD_CATEGORIES
            .iter()
            .map(|(key, display_name, items, advice)| Category {
                key: (*key).to_string(),
                display_name: (*display_name).to_string(),
                item_indices: items.to_vec(),
                advice: (*advice).to_string(),
            })
            .collect();

        Self {
            balanced_key: STANDARD_BALANCED_KEY.to_string(),
            balanced_index: categories.len() - 1,
            categories,
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn balanced_key(&self) -> &str {
        &self.balanced_key
    }

    pub fn balanced(&self) -> &Category {
        &self.categories[self.balanced_index]
    }

    pub(crate) fn balanced_index(&self) -> usize {
        self.balanced_index
    }

    pub fn get(&self, key: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.key == key)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Highest questionnaire item referenced by any category.
    pub fn max_item_index(&self) -> u16 {
        self.categories
            .iter()
            .flat_map(|category| category.item_indices.iter().copied())
            .max()
            .unwrap_or(0)
    }

    pub fn views(&self) -> Vec<CategoryView> {
        self.categories
            .iter()
            .enumerate()
            .map(|(index, category)| CategoryView {
                key: category.key.clone(),
                display_name: category.display_name.clone(),
                item_count: category.item_count(),
                balanced: index == self.balanced_index,
            })
            .collect()
    }
}

/// Public listing entry for the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryView {
    pub key: String,
    pub display_name: String,
    pub item_count: usize,
    pub balanced: bool,
}

/// Configuration faults. These surface at startup and are never produced by answers.
#[derive(Debug, thiserror::Error)]
pub enum CategoryTableError {
    #[error("category table has no categories")]
    Empty,
    #[error("category key '{0}' is declared more than once")]
    DuplicateKey(String),
    #[error("category '{0}' has no questionnaire items")]
    EmptyItems(String),
    #[error("category '{0}' references item 0; items are numbered from 1")]
    ZeroItemIndex(String),
    #[error("category '{key}' lists item {index} more than once")]
    RepeatedItem { key: String, index: u16 },
    #[error("balanced category '{0}' is not declared in the table")]
    MissingBalanced(String),
    #[error("unable to read category table {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("category table is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

const STANDARD_BALANCED_KEY: &str = "neutral";

// Balanced entry stays last; `standard()` relies on it.
const STANDARD_CATEGORIES: &[(&str, &str, &[u16], &str)] = &[
    (
        "qi_deficiency",
        "Qi Deficiency",
        &[2, 3, 4, 14, 19, 25, 26, 30],
        "Tonify qi and nourish the blood with gentle exercise such as Baduanjin. Favor Chinese yam, jujube and hyacinth bean.",
    ),
    (
        "yang_deficiency",
        "Yang Deficiency",
        &[7, 8, 9, 10, 11, 12, 13],
        "Warm the yang and keep the abdomen warm. Favor lamb, ginger and pepper; cut back on cold drinks.",
    ),
    (
        "yin_deficiency",
        "Yin Deficiency",
        &[15, 16, 17, 18, 20, 21, 22, 23],
        "Nourish yin and moisten dryness; avoid spicy and drying foods. Favor white fungus, lily bulb and pear, and keep a full night's sleep.",
    ),
    (
        "damp_phlegm",
        "Phlegm-Dampness",
        &[24, 27, 28, 29, 31, 32, 33, 34],
        "Strengthen the spleen and resolve dampness with a light diet. Favor adzuki beans, coix seed and lotus leaf; avoid rich, greasy food.",
    ),
    (
        "damp_heat",
        "Damp-Heat",
        &[35, 36, 37, 38, 39, 40, 41],
        "Clear heat and drain dampness while keeping an even temper. Favor mung beans, bitter melon and celery; avoid tobacco and alcohol.",
    ),
    (
        "blood_stasis",
        "Blood Stasis",
        &[42, 43, 44, 45, 46, 47, 48],
        "Invigorate the blood and keep the mood relaxed. Favor black beans, hawthorn and brown sugar; avoid sitting for long periods.",
    ),
    (
        "qi_stagnation",
        "Qi Stagnation",
        &[5, 6, 49, 50, 51, 52, 53],
        "Soothe the liver and move qi; take part in social activities. Favor rose tea, finger citron and citrus.",
    ),
    (
        "special_diathesis",
        "Special Diathesis",
        &[54, 55, 56, 57, 58, 59, 60],
        "Support the defensive qi and stay away from known allergens. Keep meals light and daily routines regular.",
    ),
    (
        STANDARD_BALANCED_KEY,
        "Balanced",
        &[1, 2, 4, 5, 13, 19, 25, 26],
        "Eat in moderation and keep regular hours. Carry on with the healthy habits and steady mood already in place.",
    ),
];
