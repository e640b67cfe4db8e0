use serde::{Deserialize, Serialize};

/// 知识点类别
///
/// 九大基础单元加资优挑战，每道题只归属其中一个类别。
/// 声明顺序即报告与 prompt 中的输出顺序。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KnowledgePointCategory {
    /// 正整数
    Integer,
    /// 小数
    Decimal,
    /// 分数
    Fraction,
    /// 容积
    Volume,
    /// 距离问题
    Distance,
    /// 时间问题
    Time,
    /// 解题策略
    ProblemSolving,
    /// 规律推演
    Pattern,
    /// 面积/立方体
    AreaCube,
    /// 资优挑战
    Gifted,
}

impl KnowledgePointCategory {
    const ALL: [KnowledgePointCategory; 10] = [
        KnowledgePointCategory::Integer,
        KnowledgePointCategory::Decimal,
        KnowledgePointCategory::Fraction,
        KnowledgePointCategory::Volume,
        KnowledgePointCategory::Distance,
        KnowledgePointCategory::Time,
        KnowledgePointCategory::ProblemSolving,
        KnowledgePointCategory::Pattern,
        KnowledgePointCategory::AreaCube,
        KnowledgePointCategory::Gifted,
    ];

    /// 按声明顺序返回全部类别
    pub fn all() -> &'static [KnowledgePointCategory] {
        &Self::ALL
    }

    /// 获取类别代码（TOML / JSON 中使用的写法）
    pub fn code(self) -> &'static str {
        match self {
            KnowledgePointCategory::Integer => "INTEGER",
            KnowledgePointCategory::Decimal => "DECIMAL",
            KnowledgePointCategory::Fraction => "FRACTION",
            KnowledgePointCategory::Volume => "VOLUME",
            KnowledgePointCategory::Distance => "DISTANCE",
            KnowledgePointCategory::Time => "TIME",
            KnowledgePointCategory::ProblemSolving => "PROBLEM_SOLVING",
            KnowledgePointCategory::Pattern => "PATTERN",
            KnowledgePointCategory::AreaCube => "AREA_CUBE",
            KnowledgePointCategory::Gifted => "GIFTED",
        }
    }

    /// 获取显示名称
    pub fn name(self) -> &'static str {
        match self {
            KnowledgePointCategory::Integer => "正整數",
            KnowledgePointCategory::Decimal => "小數",
            KnowledgePointCategory::Fraction => "分數",
            KnowledgePointCategory::Volume => "容積",
            KnowledgePointCategory::Distance => "距離問題",
            KnowledgePointCategory::Time => "時間問題",
            KnowledgePointCategory::ProblemSolving => "解題策略",
            KnowledgePointCategory::Pattern => "規律推演",
            KnowledgePointCategory::AreaCube => "面積/立方體",
            KnowledgePointCategory::Gifted => "資優挑戰",
        }
    }

    /// 从类别代码解析
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.code() == code)
    }
}

impl std::fmt::Display for KnowledgePointCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 数学素养维度
///
/// 与知识点不同，一道题可以同时贡献多个维度。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MathLiteracyDimension {
    /// 概念理解
    ConceptualUnderstanding,
    /// 计算流畅度
    ComputationalFluency,
    /// 情境策略与脉络素养
    ContextualStrategy,
    /// 逻辑推理
    LogicalReasoning,
}

impl MathLiteracyDimension {
    const ALL: [MathLiteracyDimension; 4] = [
        MathLiteracyDimension::ConceptualUnderstanding,
        MathLiteracyDimension::ComputationalFluency,
        MathLiteracyDimension::ContextualStrategy,
        MathLiteracyDimension::LogicalReasoning,
    ];

    pub fn all() -> &'static [MathLiteracyDimension] {
        &Self::ALL
    }

    pub fn code(self) -> &'static str {
        match self {
            MathLiteracyDimension::ConceptualUnderstanding => "CONCEPTUAL_UNDERSTANDING",
            MathLiteracyDimension::ComputationalFluency => "COMPUTATIONAL_FLUENCY",
            MathLiteracyDimension::ContextualStrategy => "CONTEXTUAL_STRATEGY",
            MathLiteracyDimension::LogicalReasoning => "LOGICAL_REASONING",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MathLiteracyDimension::ConceptualUnderstanding => "概念理解",
            MathLiteracyDimension::ComputationalFluency => "計算流暢度",
            MathLiteracyDimension::ContextualStrategy => "情境策略與脈絡素養",
            MathLiteracyDimension::LogicalReasoning => "邏輯推理",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|d| d.code() == code)
    }
}

impl std::fmt::Display for MathLiteracyDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for cat in KnowledgePointCategory::all() {
            assert_eq!(KnowledgePointCategory::from_code(cat.code()), Some(*cat));
        }
        for dim in MathLiteracyDimension::all() {
            assert_eq!(MathLiteracyDimension::from_code(dim.code()), Some(*dim));
        }
        assert_eq!(KnowledgePointCategory::from_code("integer"), None);
    }

    #[test]
    fn test_serde_uses_codes() {
        let json = serde_json::to_string(&KnowledgePointCategory::ProblemSolving).unwrap();
        assert_eq!(json, "\"PROBLEM_SOLVING\"");

        let dim: MathLiteracyDimension = serde_json::from_str("\"LOGICAL_REASONING\"").unwrap();
        assert_eq!(dim, MathLiteracyDimension::LogicalReasoning);
    }

    #[test]
    fn test_enumeration_sizes() {
        assert_eq!(KnowledgePointCategory::all().len(), 10);
        assert_eq!(MathLiteracyDimension::all().len(), 4);
        assert_eq!(KnowledgePointCategory::all()[0], KnowledgePointCategory::Integer);
    }
}
