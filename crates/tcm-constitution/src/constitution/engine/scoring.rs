use serde::{Deserialize, Serialize};

use super::super::answers::AnswerSet;
use super::super::table::{Category, CategoryTable};

/// Per-category audit entry produced by the scoring pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub key: String,
    pub display_name: String,
    pub raw_score: u32,
    pub converted_score: i32,
    pub advice: String,
}

pub(crate) fn score_table(table: &CategoryTable, answers: &AnswerSet) -> Vec<CategoryScore> {
    table
        .categories()
        .iter()
        .map(|category| score_category(category, answers))
        .collect()
}

pub(crate) fn score_category(category: &Category, answers: &AnswerSet) -> CategoryScore {
    let raw_score: u32 = category
        .item_indices
        .iter()
        .map(|&index| u32::from(answers.value(index)))
        .sum();

    CategoryScore {
        key: category.key.clone(),
        display_name: category.display_name.clone(),
        raw_score,
        converted_score: converted_score(i64::from(raw_score), category.item_count()),
        advice: category.advice.clone(),
    }
}

/// `round((raw - n) / 4n * 100)` with halves rounded away from zero.
///
/// Not clamped: raw scores below `n` produce negative results.
///
/// # Panics
///
/// Panics when `item_count` is zero. [`CategoryTable::new`] rejects empty
/// categories, so scores computed through a table never hit this.
pub(crate) fn converted_score(raw_score: i64, item_count: usize) -> i32 {
    let items = item_count as i64;
    let numerator = (raw_score - items) * 100;
    let denominator = 4 * items;
    let magnitude = (numerator.abs() * 2 + denominator) / (2 * denominator);
    (numerator.signum() * magnitude) as i32
}
