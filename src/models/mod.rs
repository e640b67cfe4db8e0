pub mod assessment;
pub mod knowledge_point;
pub mod loaders;
pub mod registry;
pub mod submission;
pub mod template;

pub use assessment::{
    AIAnalysis, AssessmentReport, AssessmentResult, KnowledgePointScore, MathLiteracyScore,
};
pub use knowledge_point::{KnowledgePointCategory, MathLiteracyDimension};
pub use loaders::{load_all_submissions, load_all_toml_templates, SubmissionFile};
pub use registry::ExamRegistry;
pub use submission::{ExamSubmission, QuestionResult};
pub use template::{ExamTemplate, QuestionDefinition, SectionDefinition};
