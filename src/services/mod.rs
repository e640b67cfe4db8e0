//! 业务能力层（Services）
//!
//! - `scoring` - 加权评分，纯函数
//! - `dependency_graph` - 知识点前置依赖表
//! - `analysis_service` - 组装 prompt、调用文本生成、解析 AI 分析

pub mod analysis_service;
pub mod dependency_graph;
pub mod scoring;

pub use analysis_service::{build_user_message, generate_ai_analysis, parse_llm_response};
pub use scoring::{
    calculate_knowledge_point_scores, calculate_math_literacy_scores, generate_assessment,
};
