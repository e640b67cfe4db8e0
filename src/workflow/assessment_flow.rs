//! 单份作答的评估流程 - 流程层
//!
//! 流程顺序：
//! 1. 按 exam_id 查找试卷模板
//! 2. 评分（失败则整份报告失败）
//! 3. 生成 AI 分析（失败只记录在报告里）

use std::sync::Arc;

use tracing::{info, warn};

use crate::clients::TextGenerator;
use crate::error::{AppError, AppResult};
use crate::models::{AssessmentReport, ExamRegistry, ExamSubmission};
use crate::services::{analysis_service, scoring};
use crate::utils::logging::truncate_text;

/// 评估流程
///
/// - 只持有共享的只读注册表和可选的文本生成器
/// - 可以在多个任务之间 clone 复用
#[derive(Clone)]
pub struct AssessmentFlow {
    registry: Arc<ExamRegistry>,
    generator: Option<Arc<dyn TextGenerator>>,
}

impl AssessmentFlow {
    /// 创建评估流程，`generator` 为空时只评分不分析
    pub fn new(registry: Arc<ExamRegistry>, generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self {
            registry,
            generator,
        }
    }

    /// 只评分的流程
    pub fn scoring_only(registry: Arc<ExamRegistry>) -> Self {
        Self::new(registry, None)
    }

    pub fn analysis_enabled(&self) -> bool {
        self.generator.is_some()
    }

    pub async fn run(&self, submission: &ExamSubmission) -> AppResult<AssessmentReport> {
        let template = self
            .registry
            .get(&submission.exam_id)
            .ok_or_else(|| AppError::exam_not_found(&submission.exam_id))?;

        let assessment = scoring::generate_assessment(template, submission)?;
        info!(
            "📝 {} / {} 评分完成",
            submission.student_name, submission.exam_id
        );

        let report = AssessmentReport::new(assessment);
        let Some(generator) = &self.generator else {
            return Ok(report);
        };

        match analysis_service::generate_ai_analysis(&report.assessment, generator.as_ref()).await {
            Ok(analysis) => {
                info!(
                    "🤖 {} AI 分析完成: {}",
                    submission.student_name,
                    truncate_text(&analysis.weakness_analysis, 30)
                );
                Ok(report.with_analysis(analysis))
            }
            Err(e) => {
                warn!("⚠️ {} AI 分析失败: {}", submission.student_name, e);
                Ok(report.with_analysis_error(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::GRADE5_ENTRANCE_EXAM_ID;
    use crate::models::{KnowledgePointCategory, QuestionResult};
    use async_trait::async_trait;

    struct CannedGenerator(&'static str);

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate(&self, _system: &str, _user_message: &str) -> anyhow::Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct BrokenGenerator;

    #[async_trait]
    impl TextGenerator for BrokenGenerator {
        async fn generate(&self, _system: &str, _user_message: &str) -> anyhow::Result<String> {
            anyhow::bail!("connection reset")
        }
    }

    fn registry() -> Arc<ExamRegistry> {
        Arc::new(ExamRegistry::with_builtin().unwrap())
    }

    fn submission(exam_id: &str, results: Vec<(&str, f64)>) -> ExamSubmission {
        ExamSubmission::new(
            "小華",
            exam_id,
            results
                .into_iter()
                .map(|(id, s)| QuestionResult::new(id, s).unwrap())
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_scoring_only() {
        let flow = AssessmentFlow::scoring_only(registry());
        let report = flow
            .run(&submission(GRADE5_ENTRANCE_EXAM_ID, vec![("1-1", 1.0)]))
            .await
            .unwrap();

        assert!(report.ai_analysis.is_none());
        assert!(report.analysis_error.is_none());
        assert_eq!(
            report.assessment.knowledge_point_score(KnowledgePointCategory::Integer),
            Some(0.3333)
        );
    }

    #[tokio::test]
    async fn test_unknown_exam() {
        let flow = AssessmentFlow::scoring_only(registry());
        let err = flow.run(&submission("nope", vec![])).await.unwrap_err();
        assert!(matches!(err, AppError::ExamNotFound { ref exam_id } if exam_id == "nope"));
    }

    #[tokio::test]
    async fn test_unknown_question_fails_whole_report() {
        let generator: Arc<dyn TextGenerator> = Arc::new(CannedGenerator("{}"));
        let flow = AssessmentFlow::new(registry(), Some(generator));
        let err = flow
            .run(&submission(GRADE5_ENTRANCE_EXAM_ID, vec![("99-9", 1.0)]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Scoring(_)));
        assert!(err.is_input_error());
    }

    #[tokio::test]
    async fn test_analysis_attached() {
        let generator: Arc<dyn TextGenerator> = Arc::new(CannedGenerator(
            "```json\n{\"weakness_analysis\": \"弱\", \"enhancement_suggestions\": \"練\"}\n```",
        ));
        let flow = AssessmentFlow::new(registry(), Some(generator));
        assert!(flow.analysis_enabled());

        let report = flow.run(&submission(GRADE5_ENTRANCE_EXAM_ID, vec![])).await.unwrap();
        let analysis = report.ai_analysis.unwrap();
        assert_eq!(analysis.weakness_analysis, "弱");
        assert_eq!(analysis.enhancement_suggestions, "練");
    }

    #[tokio::test]
    async fn test_analysis_failure_recorded_not_raised() {
        let generator: Arc<dyn TextGenerator> = Arc::new(BrokenGenerator);
        let flow = AssessmentFlow::new(registry(), Some(generator));

        let report = flow.run(&submission(GRADE5_ENTRANCE_EXAM_ID, vec![])).await.unwrap();
        assert!(report.ai_analysis.is_none());
        assert_eq!(report.analysis_error.as_deref(), Some("connection reset"));
    }
}
