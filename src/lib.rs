//! # ApexMath Assessment
//!
//! 小学数学入班检测的评分与 AI 诊断分析
//!
//! ## 架构设计
//!
//! ### ① 数据模型（Models）
//! - `models/` - 知识点、素养维度、试卷模板、学生作答、评估结果
//! - `ExamRegistry` - 以 exam_id 为键的只读试卷注册表
//! - `data/` - 内置的小五入班检测试卷
//!
//! ### ② 业务能力层（Services）
//! - `scoring` - 知识点与素养维度的加权评分（纯函数）
//! - `dependency_graph` - 知识点前置依赖表
//! - `analysis_service` - prompt 组装、文本生成、回应解析
//!
//! ### ③ 流程层（Workflow）
//! - `AssessmentFlow` - 单份作答：查模板 → 评分 → AI 分析
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量评估，管理并发和报告输出
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod data;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{LlmClient, TextGenerator};
pub use config::Config;
pub use error::{AnalysisError, AppError, AppResult, ScoringError, ValidationError};
pub use models::{
    AIAnalysis, AssessmentReport, AssessmentResult, ExamRegistry, ExamSubmission, ExamTemplate,
    KnowledgePointCategory, MathLiteracyDimension, QuestionDefinition, QuestionResult,
    SectionDefinition,
};
pub use orchestrator::{App, ProcessingStats};
pub use services::{generate_ai_analysis, generate_assessment};
pub use workflow::AssessmentFlow;
