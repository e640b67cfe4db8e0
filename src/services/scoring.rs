//! 评分引擎 - 纯函数
//!
//! 知识点分数与素养分数共用同一个加权平均算法：
//!
//! ```text
//! score(G) = Σ(得分率 × 权重) / Σ(权重) × 5.0     （分母为 0 时记 0.0）
//! ```
//!
//! - 知识点：权重为题目的难度权重，只计入题目所属的那一个类别
//! - 素养维度：权重为题目在该维度上的素养权重，一题可计入多个维度
//!
//! 未作答的题目得分率按 0 计入分母，而不是被排除。

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::ScoringError;
use crate::models::{
    AssessmentResult, ExamSubmission, ExamTemplate, KnowledgePointCategory, KnowledgePointScore,
    MathLiteracyDimension, MathLiteracyScore, QuestionDefinition,
};

/// 满分
pub const MAX_SCORE: f64 = 5.0;

/// question_id → 得分率
type ScoreMap<'a> = HashMap<&'a str, f64>;

/// 计算各知识点类别的加权分数，覆盖全部类别
pub fn calculate_knowledge_point_scores(
    template: &ExamTemplate,
    submission: &ExamSubmission,
) -> Result<Vec<KnowledgePointScore>, ScoringError> {
    let score_map = build_score_map(template, submission)?;
    Ok(knowledge_point_scores(template, &score_map))
}

/// 计算各素养维度的加权分数，覆盖全部维度
pub fn calculate_math_literacy_scores(
    template: &ExamTemplate,
    submission: &ExamSubmission,
) -> Result<Vec<MathLiteracyScore>, ScoringError> {
    let score_map = build_score_map(template, submission)?;
    Ok(math_literacy_scores(template, &score_map))
}

/// 整合知识点分数与素养分数，产生完整评估结果
///
/// 提交中只要有一个题目 ID 不在试卷里就整体失败，不产生部分结果。
pub fn generate_assessment(
    template: &ExamTemplate,
    submission: &ExamSubmission,
) -> Result<AssessmentResult, ScoringError> {
    let score_map = build_score_map(template, submission)?;

    debug!(
        "评分: {} / {}，作答 {} 题，试卷共 {} 题",
        submission.student_name,
        template.exam_id(),
        score_map.len(),
        template.question_count()
    );

    Ok(AssessmentResult {
        student_name: submission.student_name.clone(),
        exam_id: submission.exam_id.clone(),
        knowledge_point_scores: knowledge_point_scores(template, &score_map),
        math_literacy_scores: math_literacy_scores(template, &score_map),
    })
}

/// 校验提交并建立得分率映射
///
/// 同一题出现多次时以最后一次为准。
fn build_score_map<'a>(
    template: &ExamTemplate,
    submission: &'a ExamSubmission,
) -> Result<ScoreMap<'a>, ScoringError> {
    let valid_ids: HashSet<&str> = template.questions().map(|q| q.question_id()).collect();

    let mut score_map = HashMap::with_capacity(submission.results.len());
    for result in &submission.results {
        if !valid_ids.contains(result.question_id()) {
            return Err(ScoringError::UnknownQuestion {
                question_id: result.question_id().to_string(),
            });
        }
        score_map.insert(result.question_id(), result.score());
    }
    Ok(score_map)
}

fn knowledge_point_scores(
    template: &ExamTemplate,
    score_map: &ScoreMap<'_>,
) -> Vec<KnowledgePointScore> {
    KnowledgePointCategory::all()
        .iter()
        .map(|&category| KnowledgePointScore {
            category,
            score: weighted_score(template, score_map, |q| {
                if q.knowledge_point() == category {
                    q.difficulty_weight()
                } else {
                    0.0
                }
            }),
        })
        .collect()
}

fn math_literacy_scores(
    template: &ExamTemplate,
    score_map: &ScoreMap<'_>,
) -> Vec<MathLiteracyScore> {
    MathLiteracyDimension::all()
        .iter()
        .map(|&dimension| MathLiteracyScore {
            dimension,
            score: weighted_score(template, score_map, |q| q.literacy_weight(dimension)),
        })
        .collect()
}

/// 对单个目标组求加权平均并换算到 0～5
fn weighted_score(
    template: &ExamTemplate,
    score_map: &ScoreMap<'_>,
    weight: impl Fn(&QuestionDefinition) -> f64,
) -> f64 {
    let (numerator, denominator) = template
        .questions()
        .map(|q| (score_map.get(q.question_id()).copied().unwrap_or(0.0), weight(q)))
        .filter(|(_, w)| *w > 0.0)
        .fold((0.0, 0.0), |(num, den), (answered, w)| (num + answered * w, den + w));

    if denominator > 0.0 {
        round4(numerator / denominator * MAX_SCORE)
    } else {
        0.0
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{QuestionResult, SectionDefinition};
    use KnowledgePointCategory as KP;
    use MathLiteracyDimension as ML;

    fn question(id: &str, kp: KP, dw: f64, lw: &[(ML, f64)]) -> QuestionDefinition {
        QuestionDefinition::new(id, kp, dw, lw.iter().copied()).unwrap()
    }

    /// 两道正整数题：简单 0.2、困难 1.0
    fn simple_template() -> ExamTemplate {
        let section = SectionDefinition::new(
            "s1",
            "正整數",
            KP::Integer,
            vec![
                question("1-1", KP::Integer, 0.2, &[(ML::ConceptualUnderstanding, 1.0)]),
                question("1-2", KP::Integer, 1.0, &[(ML::ConceptualUnderstanding, 1.0)]),
            ],
        );
        ExamTemplate::new("test", "測試", vec![section]).unwrap()
    }

    fn literacy_template() -> ExamTemplate {
        let section = SectionDefinition::new(
            "s1",
            "正整數",
            KP::Integer,
            vec![
                question(
                    "1-1",
                    KP::Integer,
                    0.5,
                    &[(ML::ConceptualUnderstanding, 0.8), (ML::ComputationalFluency, 0.5)],
                ),
                question(
                    "1-2",
                    KP::Integer,
                    0.5,
                    &[(ML::ConceptualUnderstanding, 0.3), (ML::LogicalReasoning, 1.0)],
                ),
            ],
        );
        ExamTemplate::new("test", "測試", vec![section]).unwrap()
    }

    fn submission(results: &[(&str, f64)]) -> ExamSubmission {
        ExamSubmission::new(
            "小明",
            "test",
            results
                .iter()
                .map(|(id, s)| QuestionResult::new(*id, *s).unwrap())
                .collect(),
        )
    }

    fn integer_score(template: &ExamTemplate, sub: &ExamSubmission) -> f64 {
        let scores = calculate_knowledge_point_scores(template, sub).unwrap();
        scores.iter().find(|s| s.category == KP::Integer).unwrap().score
    }

    #[test]
    fn test_all_correct_gives_full_score() {
        let template = simple_template();
        assert_eq!(integer_score(&template, &submission(&[("1-1", 1.0), ("1-2", 1.0)])), 5.0);
    }

    #[test]
    fn test_all_wrong_gives_zero() {
        let template = simple_template();
        assert_eq!(integer_score(&template, &submission(&[("1-1", 0.0), ("1-2", 0.0)])), 0.0);
    }

    #[test]
    fn test_hard_question_counts_more() {
        let template = simple_template();
        let hard = integer_score(&template, &submission(&[("1-1", 0.0), ("1-2", 1.0)]));
        let easy = integer_score(&template, &submission(&[("1-1", 1.0), ("1-2", 0.0)]));
        assert!(hard > easy, "hard={hard} easy={easy}");
    }

    #[test]
    fn test_partial_credit() {
        let template = simple_template();
        assert_eq!(integer_score(&template, &submission(&[("1-1", 0.5), ("1-2", 0.5)])), 2.5);
    }

    #[test]
    fn test_unanswered_counts_as_zero() {
        let template = simple_template();
        let score = integer_score(&template, &submission(&[("1-1", 1.0)]));
        // 0.2 / 1.2 * 5
        assert_eq!(score, 0.8333);
        assert!(score < MAX_SCORE);
    }

    #[test]
    fn test_every_category_present_and_empty_ones_zero() {
        let template = simple_template();
        let scores = calculate_knowledge_point_scores(&template, &submission(&[])).unwrap();
        let categories: Vec<KP> = scores.iter().map(|s| s.category).collect();
        assert_eq!(categories, KP::all().to_vec());

        let decimal = scores.iter().find(|s| s.category == KP::Decimal).unwrap();
        assert_eq!(decimal.score, 0.0);
    }

    #[test]
    fn test_unknown_question_rejected() {
        let template = simple_template();
        let bad = submission(&[("1-1", 1.0), ("INVALID", 1.0)]);
        let err = calculate_knowledge_point_scores(&template, &bad).unwrap_err();
        assert_eq!(
            err,
            ScoringError::UnknownQuestion {
                question_id: "INVALID".to_string()
            }
        );
        let only_bad = submission(&[("INVALID", 1.0)]);
        assert!(calculate_math_literacy_scores(&template, &only_bad).is_err());
    }

    #[test]
    fn test_literacy_all_correct_per_dimension() {
        let template = literacy_template();
        let all_correct = submission(&[("1-1", 1.0), ("1-2", 1.0)]);
        let scores = calculate_math_literacy_scores(&template, &all_correct).unwrap();

        for s in &scores {
            let expected = if s.dimension == ML::ContextualStrategy {
                0.0
            } else {
                5.0
            };
            assert_eq!(s.score, expected, "{:?}", s.dimension);
        }
    }

    #[test]
    fn test_literacy_contributes_to_several_dimensions() {
        let template = literacy_template();
        let scores =
            calculate_math_literacy_scores(&template, &submission(&[("1-1", 1.0)])).unwrap();
        let get = |d: ML| scores.iter().find(|s| s.dimension == d).unwrap().score;

        // 概念理解: 0.8 / (0.8 + 0.3) * 5
        assert_eq!(get(ML::ConceptualUnderstanding), 3.6364);
        assert_eq!(get(ML::ComputationalFluency), 5.0);
        assert_eq!(get(ML::LogicalReasoning), 0.0);
    }

    #[test]
    fn test_generate_assessment_structure() {
        let template = simple_template();
        let all_correct = submission(&[("1-1", 1.0), ("1-2", 1.0)]);
        let result = generate_assessment(&template, &all_correct).unwrap();

        assert_eq!(result.student_name, "小明");
        assert_eq!(result.exam_id, "test");
        assert_eq!(result.knowledge_point_scores.len(), 10);
        assert_eq!(result.math_literacy_scores.len(), 4);
        assert_eq!(result.knowledge_point_score(KP::Integer), Some(5.0));
    }

    #[test]
    fn test_duplicate_result_last_wins() {
        let template = simple_template();
        let score = integer_score(&template, &submission(&[("1-2", 0.0), ("1-2", 1.0)]));
        // 1.0 / 1.2 * 5
        assert_eq!(score, 4.1667);
    }

    #[test]
    fn test_round4() {
        assert_eq!(round4(1.0 / 3.0), 0.3333);
        assert_eq!(round4(2.0 / 3.0), 0.6667);
        assert_eq!(round4(5.0), 5.0);
    }
}
