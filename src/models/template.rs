//! 试卷模板
//!
//! `ExamTemplate` → `SectionDefinition` → `QuestionDefinition` 三层结构。
//! 构造时完成全部校验（权重为正、题目 ID 唯一），反序列化同样走构造函数，
//! 因此拿到手的模板一定是合法的，之后只读。

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::models::{KnowledgePointCategory, MathLiteracyDimension};

/// 单题定义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "QuestionDefinitionData")]
pub struct QuestionDefinition {
    question_id: String,
    knowledge_point: KnowledgePointCategory,
    /// 难度权重，越大越难
    difficulty_weight: f64,
    literacy_weights: BTreeMap<MathLiteracyDimension, f64>,
}

impl QuestionDefinition {
    /// 创建题目定义
    ///
    /// 难度权重与每个素养权重都必须是有限正数，素养权重不能为空。
    pub fn new(
        question_id: impl Into<String>,
        knowledge_point: KnowledgePointCategory,
        difficulty_weight: f64,
        literacy_weights: impl IntoIterator<Item = (MathLiteracyDimension, f64)>,
    ) -> Result<Self, ValidationError> {
        let question_id = question_id.into();

        if !is_positive(difficulty_weight) {
            return Err(ValidationError::NonPositiveDifficulty {
                question_id,
                weight: difficulty_weight,
            });
        }

        let literacy_weights: BTreeMap<_, _> = literacy_weights.into_iter().collect();
        if literacy_weights.is_empty() {
            return Err(ValidationError::EmptyLiteracyWeights { question_id });
        }
        if let Some((&dimension, &weight)) =
            literacy_weights.iter().find(|(_, w)| !is_positive(**w))
        {
            return Err(ValidationError::NonPositiveLiteracyWeight {
                question_id,
                dimension,
                weight,
            });
        }

        Ok(Self {
            question_id,
            knowledge_point,
            difficulty_weight,
            literacy_weights,
        })
    }

    pub fn question_id(&self) -> &str {
        &self.question_id
    }

    pub fn knowledge_point(&self) -> KnowledgePointCategory {
        self.knowledge_point
    }

    pub fn difficulty_weight(&self) -> f64 {
        self.difficulty_weight
    }

    pub fn literacy_weights(&self) -> &BTreeMap<MathLiteracyDimension, f64> {
        &self.literacy_weights
    }

    /// 该题对某个素养维度的权重，未贡献时为 0
    pub fn literacy_weight(&self, dimension: MathLiteracyDimension) -> f64 {
        self.literacy_weights.get(&dimension).copied().unwrap_or(0.0)
    }
}

#[derive(Deserialize)]
struct QuestionDefinitionData {
    question_id: String,
    knowledge_point: KnowledgePointCategory,
    difficulty_weight: f64,
    literacy_weights: BTreeMap<MathLiteracyDimension, f64>,
}

impl TryFrom<QuestionDefinitionData> for QuestionDefinition {
    type Error = ValidationError;

    fn try_from(data: QuestionDefinitionData) -> Result<Self, Self::Error> {
        QuestionDefinition::new(
            data.question_id,
            data.knowledge_point,
            data.difficulty_weight,
            data.literacy_weights,
        )
    }
}

/// 单元定义
///
/// 单元上的 `knowledge_point` 只用于展示分组，评分以每道题自己的类别为准。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionDefinition {
    pub section_id: String,
    pub name: String,
    pub knowledge_point: KnowledgePointCategory,
    #[serde(default)]
    pub questions: Vec<QuestionDefinition>,
}

impl SectionDefinition {
    pub fn new(
        section_id: impl Into<String>,
        name: impl Into<String>,
        knowledge_point: KnowledgePointCategory,
        questions: Vec<QuestionDefinition>,
    ) -> Self {
        Self {
            section_id: section_id.into(),
            name: name.into(),
            knowledge_point,
            questions,
        }
    }
}

/// 试卷模板
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ExamTemplateData")]
pub struct ExamTemplate {
    exam_id: String,
    name: String,
    sections: Vec<SectionDefinition>,
}

impl ExamTemplate {
    /// 创建试卷模板，题目 ID 在整份试卷内必须唯一
    pub fn new(
        exam_id: impl Into<String>,
        name: impl Into<String>,
        sections: Vec<SectionDefinition>,
    ) -> Result<Self, ValidationError> {
        let exam_id = exam_id.into();

        let mut seen = HashSet::new();
        for question in sections.iter().flat_map(|s| s.questions.iter()) {
            if !seen.insert(question.question_id()) {
                return Err(ValidationError::DuplicateQuestionId {
                    exam_id,
                    question_id: question.question_id().to_string(),
                });
            }
        }

        Ok(Self {
            exam_id,
            name: name.into(),
            sections,
        })
    }

    pub fn exam_id(&self) -> &str {
        &self.exam_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sections(&self) -> &[SectionDefinition] {
        &self.sections
    }

    /// 按单元顺序遍历全部题目
    pub fn questions(&self) -> impl Iterator<Item = &QuestionDefinition> + '_ {
        self.sections.iter().flat_map(|s| s.questions.iter())
    }

    pub fn question_count(&self) -> usize {
        self.sections.iter().map(|s| s.questions.len()).sum()
    }
}

#[derive(Deserialize)]
struct ExamTemplateData {
    exam_id: String,
    name: String,
    #[serde(default)]
    sections: Vec<SectionDefinition>,
}

impl TryFrom<ExamTemplateData> for ExamTemplate {
    type Error = ValidationError;

    fn try_from(data: ExamTemplateData) -> Result<Self, Self::Error> {
        ExamTemplate::new(data.exam_id, data.name, data.sections)
    }
}

fn is_positive(weight: f64) -> bool {
    weight.is_finite() && weight > 0.0
}
