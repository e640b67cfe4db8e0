//! 小五入班检测：10 个单元共 44 题的内置试卷

use crate::error::ValidationError;
use crate::models::{
    ExamTemplate, KnowledgePointCategory as KP, MathLiteracyDimension as ML, QuestionDefinition,
    SectionDefinition,
};

pub const GRADE5_ENTRANCE_EXAM_ID: &str = "grade5_entrance";

fn q(
    id: &str,
    kp: KP,
    difficulty: f64,
    weights: &[(ML, f64)],
) -> Result<QuestionDefinition, ValidationError> {
    QuestionDefinition::new(id, kp, difficulty, weights.iter().copied())
}

fn section(
    id: &str,
    name: &str,
    kp: KP,
    questions: Vec<Result<QuestionDefinition, ValidationError>>,
) -> Result<SectionDefinition, ValidationError> {
    let questions = questions.into_iter().collect::<Result<Vec<_>, _>>()?;
    Ok(SectionDefinition::new(id, name, kp, questions))
}

/// 构建小五入班检测模板
pub fn grade5_entrance_template() -> Result<ExamTemplate, ValidationError> {
    use ML::{
        ComputationalFluency as CF, ConceptualUnderstanding as CU, ContextualStrategy as CS,
        LogicalReasoning as LR,
    };

    let sections = vec![
        section(
            "sec-1",
            "正整數運算思維",
            KP::Integer,
            vec![
                q("1-1", KP::Integer, 0.2, &[(CU, 1.0)]),
                q("1-2", KP::Integer, 0.4, &[(CU, 0.5), (CF, 0.8)]),
                q("1-3", KP::Integer, 0.6, &[(CF, 1.0)]),
                q("1-4", KP::Integer, 0.8, &[(CU, 0.5), (LR, 0.7)]),
                q("1-5", KP::Integer, 1.0, &[(CS, 0.8), (CF, 0.5)]),
            ],
        )?,
        section(
            "sec-2",
            "小數思維",
            KP::Decimal,
            vec![
                q("2-1", KP::Decimal, 0.2, &[(CU, 1.0)]),
                q("2-2", KP::Decimal, 0.4, &[(CF, 1.0)]),
                q("2-3", KP::Decimal, 0.6, &[(CF, 0.8), (CU, 0.4)]),
                q("2-4", KP::Decimal, 0.8, &[(LR, 0.6), (CF, 0.5)]),
                q("2-5", KP::Decimal, 1.0, &[(CS, 0.9), (CF, 0.4)]),
            ],
        )?,
        section(
            "sec-3",
            "分數思維",
            KP::Fraction,
            vec![
                q("3-1", KP::Fraction, 0.2, &[(CU, 1.0)]),
                q("3-2", KP::Fraction, 0.4, &[(CU, 0.6), (CF, 0.6)]),
                q("3-3", KP::Fraction, 0.6, &[(CF, 1.0)]),
                q("3-4", KP::Fraction, 0.8, &[(CF, 0.7), (LR, 0.5)]),
                q("3-5", KP::Fraction, 1.0, &[(CS, 0.8), (CF, 0.5)]),
            ],
        )?,
        section(
            "sec-4",
            "容積與面積問題",
            KP::Volume,
            vec![
                q("4-1", KP::Volume, 0.3, &[(CU, 0.8), (CF, 0.4)]),
                q("4-2", KP::Volume, 0.5, &[(CF, 1.0)]),
                q("4-3", KP::Volume, 0.7, &[(CS, 0.7), (CF, 0.5)]),
                q("4-4", KP::Volume, 1.0, &[(CS, 0.9), (LR, 0.4)]),
            ],
        )?,
        section(
            "sec-5",
            "距離問題與單位換算",
            KP::Distance,
            vec![
                q("5-1", KP::Distance, 0.2, &[(CU, 1.0)]),
                q("5-2", KP::Distance, 0.4, &[(CF, 0.8), (CU, 0.3)]),
                q("5-3", KP::Distance, 0.6, &[(CF, 0.7), (CS, 0.5)]),
                q("5-4", KP::Distance, 0.8, &[(CS, 0.8), (CF, 0.4)]),
                q("5-5", KP::Distance, 1.0, &[(CS, 1.0), (LR, 0.3)]),
            ],
        )?,
        section(
            "sec-6",
            "時間問題",
            KP::Time,
            vec![
                q("6-1", KP::Time, 0.2, &[(CU, 1.0)]),
                q("6-2", KP::Time, 0.4, &[(CF, 0.8), (CU, 0.4)]),
                q("6-3", KP::Time, 0.6, &[(CF, 0.6), (CS, 0.6)]),
                q("6-4", KP::Time, 0.8, &[(CS, 0.9), (LR, 0.3)]),
                q("6-5", KP::Time, 1.0, &[(LR, 0.7), (CS, 0.6)]),
            ],
        )?,
        section(
            "sec-7",
            "應用問題解題策略",
            KP::ProblemSolving,
            vec![
                q("7-1", KP::ProblemSolving, 0.2, &[(CS, 0.8), (CU, 0.4)]),
                q("7-2", KP::ProblemSolving, 0.4, &[(CS, 0.9), (CF, 0.3)]),
                q("7-3", KP::ProblemSolving, 0.6, &[(CS, 1.0), (LR, 0.4)]),
                q("7-4", KP::ProblemSolving, 0.8, &[(CS, 0.8), (LR, 0.6)]),
                q("7-5", KP::ProblemSolving, 1.0, &[(LR, 0.8), (CS, 0.7)]),
            ],
        )?,
        section(
            "sec-8",
            "規律推演",
            KP::Pattern,
            vec![
                q("8-1", KP::Pattern, 0.2, &[(LR, 0.8), (CU, 0.4)]),
                q("8-2", KP::Pattern, 0.4, &[(LR, 1.0)]),
                q("8-3", KP::Pattern, 0.6, &[(LR, 0.9), (CS, 0.3)]),
                q("8-4", KP::Pattern, 0.8, &[(LR, 1.0), (CF, 0.3)]),
                q("8-5", KP::Pattern, 1.0, &[(LR, 1.0), (CS, 0.5)]),
            ],
        )?,
        section(
            "sec-9",
            "面積與立方體問題",
            KP::AreaCube,
            vec![
                q("9-1", KP::AreaCube, 0.5, &[(CU, 0.6), (CF, 0.7)]),
                q("9-2", KP::AreaCube, 1.0, &[(LR, 0.7), (CU, 0.5)]),
            ],
        )?,
        section(
            "sec-10",
            "資優思維",
            KP::Gifted,
            vec![
                q("10-1", KP::Gifted, 0.6, &[(CF, 0.8), (LR, 0.5)]),
                q("10-2", KP::Gifted, 0.8, &[(LR, 0.9), (CF, 0.4)]),
                q("10-3", KP::Gifted, 1.0, &[(LR, 1.0), (CS, 0.6)]),
            ],
        )?,
    ];

    ExamTemplate::new(GRADE5_ENTRANCE_EXAM_ID, "小五入班檢測", sections)
}
