use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// 学生单题作答结果
///
/// `score` 是 0.0～1.0 的得分率，不是对错二值。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "QuestionResultData")]
pub struct QuestionResult {
    question_id: String,
    score: f64,
}

impl QuestionResult {
    pub fn new(question_id: impl Into<String>, score: f64) -> Result<Self, ValidationError> {
        let question_id = question_id.into();
        if !(0.0..=1.0).contains(&score) {
            return Err(ValidationError::ScoreOutOfRange { question_id, score });
        }
        Ok(Self { question_id, score })
    }

    pub fn question_id(&self) -> &str {
        &self.question_id
    }

    pub fn score(&self) -> f64 {
        self.score
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct QuestionResultData {
    question_id: String,
    score: f64,
}

impl TryFrom<QuestionResultData> for QuestionResult {
    type Error = ValidationError;

    fn try_from(data: QuestionResultData) -> Result<Self, Self::Error> {
        QuestionResult::new(data.question_id, data.score)
    }
}

/// 学生整份试卷的作答提交
///
/// 没出现在 `results` 里的题目按 0 分处理，不算错误。
/// 未知字段直接报错，评估报告等其他 JSON 不会被当成空白作答。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExamSubmission {
    pub student_name: String,
    pub exam_id: String,
    #[serde(default)]
    pub results: Vec<QuestionResult>,
}

impl ExamSubmission {
    pub fn new(
        student_name: impl Into<String>,
        exam_id: impl Into<String>,
        results: Vec<QuestionResult>,
    ) -> Self {
        Self {
            student_name: student_name.into(),
            exam_id: exam_id.into(),
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_range_is_inclusive() {
        assert!(QuestionResult::new("1-1", 0.0).is_ok());
        assert!(QuestionResult::new("1-1", 1.0).is_ok());
        assert!(QuestionResult::new("1-1", 0.35).is_ok());
    }

    #[test]
    fn test_score_out_of_range_rejected() {
        for score in [-0.1, 1.01, f64::NAN] {
            let err = QuestionResult::new("1-1", score).unwrap_err();
            assert!(matches!(err, ValidationError::ScoreOutOfRange { .. }));
        }
    }

    #[test]
    fn test_submission_results_default_to_empty() {
        let json = r#"{"student_name": "小明", "exam_id": "grade5_entrance"}"#;
        let submission: ExamSubmission = serde_json::from_str(json).unwrap();
        assert!(submission.results.is_empty());
    }

    #[test]
    fn test_deserialize_rejects_bad_score() {
        let json = r#"{"student_name": "小明", "exam_id": "e",
            "results": [{"question_id": "1-1", "score": 2.0}]}"#;
        let err = serde_json::from_str::<ExamSubmission>(json).unwrap_err();
        assert!(err.to_string().contains("1-1"));
    }

    #[test]
    fn test_deserialize_rejects_report_json() {
        let report = r#"{"student_name": "小明", "exam_id": "grade5_entrance",
            "assessment": {}, "ai_analysis": null, "generated_at": "2026-01-01T00:00:00+08:00"}"#;
        let err = serde_json::from_str::<ExamSubmission>(report).unwrap_err();
        assert!(err.to_string().contains("unknown field"));

        let typo = r#"{"student_name": "小明", "exam_id": "e",
            "results": [{"question_id": "1-1", "scroe": 1.0}]}"#;
        assert!(serde_json::from_str::<ExamSubmission>(typo).is_err());
    }
}
