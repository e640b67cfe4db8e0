//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<SubmissionFile>)
//!     ↓
//! workflow::AssessmentFlow (处理单份作答)
//!     ↓
//! services (能力层：scoring / dependency_graph / analysis_service)
//!     ↓
//! clients (文本生成：LlmClient)
//! ```
//!
//! 只做调度和统计，不做具体评分判断。

pub mod batch_processor;

pub use batch_processor::{App, ProcessingStats};
