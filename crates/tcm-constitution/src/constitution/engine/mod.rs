mod config;
mod policy;
mod scoring;

pub use config::ClassificationThresholds;
pub use policy::{ConstitutionStatus, MAX_SELECTED};
pub use scoring::CategoryScore;

#[cfg(test)]
pub(crate) use scoring::converted_score;

pub(crate) use policy::{Pick, Selection};

use std::collections::BTreeMap;

use super::answers::AnswerSet;
use super::table::CategoryTable;
use policy::select;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Joins `"{name}({status})"` entries in the summary line.
pub const SUMMARY_DELIMITER: &str = "、";

/// Stateless classifier over a fixed category table.
#[derive(Debug, Clone)]
pub struct ClassificationEngine {
    table: CategoryTable,
    thresholds: ClassificationThresholds,
}

impl ClassificationEngine {
    pub fn new(table: CategoryTable, thresholds: ClassificationThresholds) -> Self {
        Self { table, thresholds }
    }

    pub fn standard() -> Self {
        Self::new(CategoryTable::standard(), ClassificationThresholds::default())
    }

    pub fn table(&self) -> &CategoryTable {
        &self.table
    }

    pub fn thresholds(&self) -> &ClassificationThresholds {
        &self.thresholds
    }

    pub fn classify(&self, answers: &AnswerSet) -> ClassificationResult {
        let (result, _) = self.classify_with_selection(answers);
        result
    }

    pub(crate) fn classify_with_selection(
        &self,
        answers: &AnswerSet,
    ) -> (ClassificationResult, Selection) {
        let scores = scoring::score_table(&self.table, answers);
        let selection = select(&scores, self.table.balanced_index(), &self.thresholds);

        let finding =
            |pick: &Pick| ConstitutionFinding::from_score(&scores[pick.index], pick.status);

        let (main_constitutions, summary, advice) = match &selection {
            Selection::BalancedOnly(pick) => (vec![finding(pick)], None, None),
            Selection::Ranked {
                picks,
                suppressed_balanced,
            } => {
                if let Some(status) = suppressed_balanced {
                    debug!(
                        balanced = %self.table.balanced_key(),
                        status = status.label(),
                        "balanced verdict withheld because other constitutions qualified"
                    );
                }

                let findings: Vec<ConstitutionFinding> = picks.iter().map(finding).collect();
                let summary = findings
                    .iter()
                    .map(|finding| {
                        format!("{}({})", finding.display_name, finding.status.label())
                    })
                    .collect::<Vec<_>>()
                    .join(SUMMARY_DELIMITER);
                let advice = findings
                    .iter()
                    .map(|finding| finding.advice.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                (findings, Some(summary), Some(advice))
            }
        };

        let all_scores = scores
            .into_iter()
            .map(|score| (score.key.clone(), score))
            .collect();

        let result = ClassificationResult {
            main_constitutions,
            all_scores,
            summary,
            advice,
        };
        (result, selection)
    }
}

/// A reported constitution with its status and advice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstitutionFinding {
    pub key: String,
    pub display_name: String,
    pub raw_score: u32,
    pub converted_score: i32,
    pub status: ConstitutionStatus,
    pub advice: String,
}

impl ConstitutionFinding {
    fn from_score(score: &CategoryScore, status: ConstitutionStatus) -> Self {
        Self {
            key: score.key.clone(),
            display_name: score.display_name.clone(),
            raw_score: score.raw_score,
            converted_score: score.converted_score,
            status,
            advice: score.advice.clone(),
        }
    }
}

/// Classification output. `all_scores` is always complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub main_constitutions: Vec<ConstitutionFinding>,
    pub all_scores: BTreeMap<String, CategoryScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advice: Option<String>,
}

impl ClassificationResult {
    /// Highest ranked finding, if any.
    pub fn primary(&self) -> Option<&ConstitutionFinding> {
        self.main_constitutions.first()
    }
}
