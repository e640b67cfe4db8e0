//! 试卷注册表
//!
//! 启动时注册全部模板，之后只读，可通过 `Arc` 在任务之间共享。

use std::collections::HashMap;

use tracing::debug;

use crate::data::grade5_entrance_template;
use crate::error::{RegistryError, ValidationError};
use crate::models::ExamTemplate;

/// 内存中的试卷注册表，以 exam_id 为键
#[derive(Debug, Default)]
pub struct ExamRegistry {
    templates: HashMap<String, ExamTemplate>,
}

impl ExamRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建并注册内置试卷
    pub fn with_builtin() -> Result<Self, ValidationError> {
        let mut registry = Self::new();
        let template = grade5_entrance_template()?;
        // 空表注册不会冲突
        registry.templates.insert(template.exam_id().to_string(), template);
        Ok(registry)
    }

    /// 注册一份模板，exam_id 已存在时报错
    pub fn register(&mut self, template: ExamTemplate) -> Result<(), RegistryError> {
        if self.templates.contains_key(template.exam_id()) {
            return Err(RegistryError::AlreadyRegistered {
                exam_id: template.exam_id().to_string(),
            });
        }
        debug!(
            "注册试卷: {} {} ({} 题)",
            template.exam_id(),
            template.name(),
            template.question_count()
        );
        self.templates.insert(template.exam_id().to_string(), template);
        Ok(())
    }

    pub fn get(&self, exam_id: &str) -> Option<&ExamTemplate> {
        self.templates.get(exam_id)
    }

    /// 列出全部已注册的 exam_id（排序后）
    pub fn list_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        KnowledgePointCategory, MathLiteracyDimension, QuestionDefinition, SectionDefinition,
    };

    fn template(exam_id: &str) -> ExamTemplate {
        let q = QuestionDefinition::new(
            "q1",
            KnowledgePointCategory::Integer,
            1.0,
            [(MathLiteracyDimension::ConceptualUnderstanding, 1.0)],
        )
        .unwrap();
        let section =
            SectionDefinition::new("s1", "正整數", KnowledgePointCategory::Integer, vec![q]);
        ExamTemplate::new(exam_id, "測試", vec![section]).unwrap()
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = ExamRegistry::new();
        assert!(registry.is_empty());

        registry.register(template("b")).unwrap();
        registry.register(template("a")).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("a").map(|t| t.exam_id()), Some("a"));
        assert!(registry.get("missing").is_none());
        assert_eq!(registry.list_ids(), vec!["a", "b"]);
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = ExamRegistry::new();
        registry.register(template("dup")).unwrap();

        let err = registry.register(template("dup")).unwrap_err();
        assert_eq!(
            err,
            RegistryError::AlreadyRegistered {
                exam_id: "dup".to_string()
            }
        );
    }

    #[test]
    fn test_with_builtin_contains_grade5() {
        let registry = ExamRegistry::with_builtin().unwrap();
        let template = registry.get("grade5_entrance").unwrap();
        assert_eq!(template.question_count(), 44);
    }
}
