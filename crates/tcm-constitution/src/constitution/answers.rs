use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Score assumed for an unanswered or unreadable item.
pub const DEFAULT_ANSWER: u8 = 1;
pub const LIKERT_MIN: i64 = 1;
pub const LIKERT_MAX: i64 = 5;

/// Questionnaire responses keyed by item index.
///
/// Only values on the 1-5 scale are retained; everything else reads back as
/// [`DEFAULT_ANSWER`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSet {
    values: BTreeMap<u16, u8>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a request body of `"q{index}"` keys. Non-object bodies yield an empty set.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self::from_json_object(map),
            _ => Self::default(),
        }
    }

    pub fn from_json_object(map: &Map<String, Value>) -> Self {
        let mut answers = Self::default();
        for (key, raw) in map {
            let Some(index) = parse_item_key(key) else {
                continue;
            };
            if let Some(value) = coerce_value(raw) {
                answers.insert(index, value);
            }
        }
        answers
    }

    /// Every item from 1 through `max_index` answered with `value`.
    pub fn uniform(max_index: u16, value: i64) -> Self {
        (1..=max_index).map(|index| (index, value)).collect()
    }

    /// Record an answer, returning whether it was on the scale. Off-scale values
    /// clear any previous answer for the item.
    pub fn insert(&mut self, index: u16, value: i64) -> bool {
        if index == 0 {
            return false;
        }
        match u8::try_from(value) {
            Ok(value) if (LIKERT_MIN..=LIKERT_MAX).contains(&i64::from(value)) => {
                self.values.insert(index, value);
                true
            }
            _ => {
                self.values.remove(&index);
                false
            }
        }
    }

    pub fn value(&self, index: u16) -> u8 {
        self.values.get(&index).copied().unwrap_or(DEFAULT_ANSWER)
    }

    pub fn answered(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(u16, i64)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (u16, i64)>>(iter: I) -> Self {
        let mut answers = Self::default();
        for (index, value) in iter {
            answers.insert(index, value);
        }
        answers
    }
}

impl<'de> Deserialize<'de> for AnswerSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self::from_json_object(&map))
    }
}

/// `"q12"` -> `12`. Only the canonical spelling counts: no sign, no leading
/// zeros, and item 0 does not exist.
pub fn parse_item_key(key: &str) -> Option<u16> {
    let digits = key.strip_prefix('q')?;
    if digits.is_empty()
        || digits.starts_with('0')
        || !digits.bytes().all(|byte| byte.is_ascii_digit())
    {
        return None;
    }
    digits.parse::<u16>().ok()
}

// Numbers and numeric strings, truncated toward zero.
fn coerce_value(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().and_then(truncate)),
        Value::String(text) => {
            let text = text.trim();
            text.parse::<i64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().and_then(truncate))
        }
        _ => None,
    }
}

fn truncate(value: f64) -> Option<i64> {
    value.is_finite().then(|| value.trunc() as i64)
}
