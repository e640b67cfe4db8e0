//! 错误类型
//!
//! 按层划分：模型构造（`ValidationError`）、评分（`ScoringError`）、
//! AI 分析（`AnalysisError`）、试卷注册表（`RegistryError`），
//! 最后由 `AppError` 汇总给流程层和编排层使用。

use thiserror::Error;

use crate::models::MathLiteracyDimension;

/// 模型构造校验错误
///
/// 在构造 `QuestionDefinition` / `ExamTemplate` / `QuestionResult` 时产生，
/// 保证非法数据不会进入评分阶段。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// 难度权重必须是有限正数
    #[error("question {question_id}: difficulty weight must be positive, got {weight}")]
    NonPositiveDifficulty { question_id: String, weight: f64 },

    /// 至少要对一个素养维度有贡献
    #[error("question {question_id}: literacy weights must not be empty")]
    EmptyLiteracyWeights { question_id: String },

    /// 素养权重必须是有限正数
    #[error("question {question_id}: {dimension} literacy weight must be positive, got {weight}")]
    NonPositiveLiteracyWeight {
        question_id: String,
        dimension: MathLiteracyDimension,
        weight: f64,
    },

    /// 整份试卷内题目 ID 重复
    #[error("duplicate question id in template {exam_id}: {question_id}")]
    DuplicateQuestionId { exam_id: String, question_id: String },

    /// 得分率超出 [0, 1]
    #[error("question {question_id}: score ratio must be within [0.0, 1.0], got {score}")]
    ScoreOutOfRange { question_id: String, score: f64 },
}

/// 评分错误
///
/// 只有一种：提交中出现了试卷里不存在的题目。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("unknown question id: {question_id}")]
    UnknownQuestion { question_id: String },
}

/// AI 分析错误
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// 模型输出无法解析为约定的 JSON 结构
    #[error("invalid response format: {reason}")]
    InvalidResponseFormat { reason: String },

    /// 文本生成服务本身失败（网络、鉴权、额度等），原样透传
    #[error(transparent)]
    Generator(anyhow::Error),
}

impl AnalysisError {
    /// 是否为格式错误（调用方可提示"请重试"）
    pub fn is_format_error(&self) -> bool {
        matches!(self, AnalysisError::InvalidResponseFormat { .. })
    }

    pub(crate) fn invalid_format(reason: impl Into<String>) -> Self {
        AnalysisError::InvalidResponseFormat {
            reason: reason.into(),
        }
    }
}

/// 试卷注册表错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("exam already registered: {exam_id}")]
    AlreadyRegistered { exam_id: String },
}

/// 配置错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// 配置值不合法
    #[error("invalid config value for {var_name}: {reason}")]
    InvalidValue { var_name: String, reason: String },
}

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("scoring error: {0}")]
    Scoring(#[from] ScoringError),

    #[error("analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 提交引用了未注册的试卷
    #[error("exam not found: {exam_id}")]
    ExamNotFound { exam_id: String },
}

impl AppError {
    /// 创建试卷未找到错误
    pub fn exam_not_found(exam_id: impl Into<String>) -> Self {
        AppError::ExamNotFound {
            exam_id: exam_id.into(),
        }
    }

    /// 是否由调用方输入引起（不应重试）
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_) | AppError::Scoring(_) | AppError::ExamNotFound { .. }
        )
    }
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
