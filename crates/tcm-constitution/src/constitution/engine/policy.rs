use super::config::ClassificationThresholds;
use super::scoring::CategoryScore;
use serde::{Deserialize, Serialize};

/// Most results reported for one questionnaire.
pub const MAX_SELECTED: usize = 2;

/// Status attached to a reported constitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstitutionStatus {
    #[serde(rename = "Present")]
    Present,
    #[serde(rename = "Leaning")]
    Leaning,
    #[serde(rename = "Essentially present")]
    EssentiallyPresent,
}

impl ConstitutionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ConstitutionStatus::Present => "Present",
            ConstitutionStatus::Leaning => "Leaning",
            ConstitutionStatus::EssentiallyPresent => "Essentially present",
        }
    }
}

/// A category picked for the report, by position in the score list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Pick {
    pub index: usize,
    pub status: ConstitutionStatus,
}

/// Terminal decision over the scored table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Selection {
    /// No candidate qualified and the balanced category did: report it alone.
    BalancedOnly(Pick),
    /// Ranked candidates. A balanced verdict reached alongside candidates is
    /// carried here but never reported.
    Ranked {
        picks: Vec<Pick>,
        suppressed_balanced: Option<ConstitutionStatus>,
    },
}

/// One row of the balanced-category rule list. Rules are tried in order.
#[derive(Debug, Clone, Copy)]
struct BalancedRule {
    status: ConstitutionStatus,
    others_below: i32,
    requires_no_candidates: bool,
}

fn balanced_rules(thresholds: &ClassificationThresholds) -> [BalancedRule; 2] {
    [
        BalancedRule {
            status: ConstitutionStatus::Present,
            others_below: thresholds.balanced_strict_ceiling,
            requires_no_candidates: false,
        },
        BalancedRule {
            status: ConstitutionStatus::EssentiallyPresent,
            others_below: thresholds.balanced_loose_ceiling,
            requires_no_candidates: true,
        },
    ]
}

pub(crate) fn candidate_status(
    converted_score: i32,
    thresholds: &ClassificationThresholds,
) -> Option<ConstitutionStatus> {
    if converted_score >= thresholds.present_min {
        Some(ConstitutionStatus::Present)
    } else if converted_score >= thresholds.leaning_min {
        Some(ConstitutionStatus::Leaning)
    } else {
        None
    }
}

pub(crate) fn balanced_status(
    scores: &[CategoryScore],
    balanced_index: usize,
    has_candidates: bool,
    thresholds: &ClassificationThresholds,
) -> Option<ConstitutionStatus> {
    if scores[balanced_index].converted_score < thresholds.balanced_min {
        return None;
    }

    let others_max = scores
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != balanced_index)
        .map(|(_, score)| score.converted_score)
        .max();

    balanced_rules(thresholds)
        .into_iter()
        .find(|rule| {
            let others_clear = others_max.map_or(true, |max| max < rule.others_below);
            others_clear && !(rule.requires_no_candidates && has_candidates)
        })
        .map(|rule| rule.status)
}

pub(crate) fn select(
    scores: &[CategoryScore],
    balanced_index: usize,
    thresholds: &ClassificationThresholds,
) -> Selection {
    let mut candidates: Vec<Pick> = scores
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != balanced_index)
        .filter_map(|(index, score)| {
            candidate_status(score.converted_score, thresholds).map(|status| Pick { index, status })
        })
        .collect();

    let balanced = balanced_status(scores, balanced_index, !candidates.is_empty(), thresholds);

    match balanced {
        Some(status) if candidates.is_empty() => Selection::BalancedOnly(Pick {
            index: balanced_index,
            status,
        }),
        suppressed_balanced => {
            // Stable sort keeps declaration order among equal scores.
            candidates.sort_by(|a, b| {
                scores[b.index]
                    .converted_score
                    .cmp(&scores[a.index].converted_score)
            });
            candidates.truncate(MAX_SELECTED);
            Selection::Ranked {
                picks: candidates,
                suppressed_balanced,
            }
        }
    }
}
