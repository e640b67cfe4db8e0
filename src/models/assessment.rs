use serde::{Deserialize, Serialize};

use crate::models::{KnowledgePointCategory, MathLiteracyDimension};

/// 单一知识点类别的得分（0～5）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KnowledgePointScore {
    pub category: KnowledgePointCategory,
    pub score: f64,
}

/// 单一素养维度的得分（0～5）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MathLiteracyScore {
    pub dimension: MathLiteracyDimension,
    pub score: f64,
}

/// 完整评估结果
///
/// 每个知识点类别、每个素养维度都会出现，按枚举声明顺序排列。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub student_name: String,
    pub exam_id: String,
    pub knowledge_point_scores: Vec<KnowledgePointScore>,
    pub math_literacy_scores: Vec<MathLiteracyScore>,
}

impl AssessmentResult {
    pub fn knowledge_point_score(&self, category: KnowledgePointCategory) -> Option<f64> {
        self.knowledge_point_scores
            .iter()
            .find(|s| s.category == category)
            .map(|s| s.score)
    }

    pub fn literacy_score(&self, dimension: MathLiteracyDimension) -> Option<f64> {
        self.math_literacy_scores
            .iter()
            .find(|s| s.dimension == dimension)
            .map(|s| s.score)
    }
}

/// AI 产出的弱点分析与强化建议
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AIAnalysis {
    pub weakness_analysis: String,
    pub enhancement_suggestions: String,
}

/// 批量处理的输出记录，一份提交对应一份报告
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentReport {
    pub student_name: String,
    pub exam_id: String,
    pub assessment: AssessmentResult,
    /// 未启用 AI 分析或分析失败时为空
    pub ai_analysis: Option<AIAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_error: Option<String>,
    /// RFC 3339 时间戳
    pub generated_at: String,
}

impl AssessmentReport {
    pub fn new(assessment: AssessmentResult) -> Self {
        Self {
            student_name: assessment.student_name.clone(),
            exam_id: assessment.exam_id.clone(),
            assessment,
            ai_analysis: None,
            analysis_error: None,
            generated_at: chrono::Local::now().to_rfc3339(),
        }
    }

    pub fn with_analysis(mut self, analysis: AIAnalysis) -> Self {
        self.ai_analysis = Some(analysis);
        self.analysis_error = None;
        self
    }

    pub fn with_analysis_error(mut self, error: impl Into<String>) -> Self {
        self.ai_analysis = None;
        self.analysis_error = Some(error.into());
        self
    }
}
