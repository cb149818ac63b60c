use super::common::*;
use crate::constitution::engine::converted_score;
use crate::constitution::{AnswerSet, ConstitutionStatus, DEFAULT_ANSWER, SUMMARY_DELIMITER};
use serde_json::json;

#[test]
fn unanswered_questionnaire_scores_zero_everywhere() {
    let engine = standard_engine();

    let result = engine.classify(&AnswerSet::new());

    assert_eq!(result.all_scores.len(), engine.table().len());
    for category in engine.table().categories() {
        let score = &result.all_scores[&category.key];
        assert_eq!(score.raw_score, category.item_count() as u32);
        assert_eq!(score.converted_score, 0);
    }
}

#[test]
fn maximal_answers_score_one_hundred_everywhere() {
    let engine = standard_engine();

    let result = engine.classify(&AnswerSet::uniform(60, 5));

    for category in engine.table().categories() {
        let score = &result.all_scores[&category.key];
        assert_eq!(score.raw_score, 5 * category.item_count() as u32);
        assert_eq!(score.converted_score, 100);
    }
}

#[test]
fn uniform_threes_pick_first_two_declared_categories() {
    let engine = standard_engine();

    let result = engine.classify(&AnswerSet::uniform(60, 3));

    for category in engine.table().categories() {
        let score = &result.all_scores[&category.key];
        assert_eq!(score.raw_score, 3 * category.item_count() as u32);
        assert_eq!(score.converted_score, 50);
    }

    let keys: Vec<&str> = result
        .main_constitutions
        .iter()
        .map(|finding| finding.key.as_str())
        .collect();
    assert_eq!(keys, ["qi_deficiency", "yang_deficiency"]);
    assert!(result
        .main_constitutions
        .iter()
        .all(|finding| finding.status == ConstitutionStatus::Present));

    let expected_summary =
        format!("Qi Deficiency(Present){SUMMARY_DELIMITER}Yang Deficiency(Present)");
    assert_eq!(result.summary.as_deref(), Some(expected_summary.as_str()));

    let qi = engine.table().get("qi_deficiency").expect("qi deficiency");
    let yang = engine.table().get("yang_deficiency").expect("yang deficiency");
    let expected_advice = format!("{} {}", qi.advice, yang.advice);
    assert_eq!(result.advice.as_deref(), Some(expected_advice.as_str()));
}

#[test]
fn converted_score_rounds_halves_away_from_zero() {
    assert_eq!(converted_score(8, 8), 0);
    assert_eq!(converted_score(40, 8), 100);
    // 4 / 32 = 12.5%, 12 / 32 = 37.5%
    assert_eq!(converted_score(12, 8), 13);
    assert_eq!(converted_score(20, 8), 38);
    // 13 / 32 = 40.625%
    assert_eq!(converted_score(21, 8), 41);
    // 8 / 28 = 28.57%
    assert_eq!(converted_score(15, 7), 29);
}

#[test]
fn converted_score_is_not_clamped_below_the_floor() {
    assert_eq!(converted_score(0, 4), -25);
    assert_eq!(converted_score(2, 4), -13);
}

#[test]
fn half_point_scores_round_up_through_the_engine() {
    let engine = standard_engine();
    // q3 belongs only to qi_deficiency (eight items).
    let answers: AnswerSet = [(3u16, 5i64)].into_iter().collect();

    let result = engine.classify(&answers);

    let qi = &result.all_scores["qi_deficiency"];
    assert_eq!(qi.raw_score, 12);
    assert_eq!(qi.converted_score, 13);
}

#[test]
fn malformed_answers_count_as_minimum() {
    let engine = standard_engine();
    let body = json!({
        "q2": "often",
        "q3": 11,
        "q4": 0,
        "q14": null,
        "q19": false,
        "q25": -3,
        "q26": {},
        "q30": "",
    });

    let result = engine.classify(&AnswerSet::from_json(&body));

    let qi = &result.all_scores["qi_deficiency"];
    assert_eq!(qi.raw_score, 8 * u32::from(DEFAULT_ANSWER));
    assert_eq!(qi.converted_score, 0);
}

#[test]
fn non_canonical_item_keys_do_not_count() {
    let engine = standard_engine();
    let body = json!({
        "q+2": 5,
        "q03": 5,
        "q004": 5,
        "q+14": 5,
        "q019": 5,
        "q25": 5,
        "q026": 5,
        "q30": 5,
    });

    let result = engine.classify(&AnswerSet::from_json(&body));

    // Only q25 and q30 are read; the other six qi items fall back to 1.
    let qi = &result.all_scores["qi_deficiency"];
    assert_eq!(qi.raw_score, 16);
    assert_eq!(qi.converted_score, 25);
    assert!(result.main_constitutions.is_empty());
}

#[test]
fn shared_items_feed_every_category_that_lists_them() {
    let engine = standard_engine();
    // q2 sits in both qi_deficiency and the balanced category.
    let answers: AnswerSet = [(2u16, 5i64)].into_iter().collect();

    let result = engine.classify(&answers);

    assert_eq!(result.all_scores["qi_deficiency"].raw_score, 12);
    assert_eq!(result.all_scores["neutral"].raw_score, 12);
    assert_eq!(result.all_scores["yin_deficiency"].raw_score, 8);
}

#[test]
fn repeated_classification_is_byte_identical() {
    let engine = standard_engine();
    let answers = AnswerSet::from_json(&json!({
        "q7": 4, "q8": 5, "q9": 3, "q35": 5, "q36": 4, "q1": 2
    }));

    let first = serde_json::to_string(&engine.classify(&answers)).expect("serializes");
    let second = serde_json::to_string(&engine.classify(&answers)).expect("serializes");

    assert_eq!(first, second);
}
