//! 知识点前置依赖表
//!
//! key 的学习需要先具备 value 中的知识点。表中没有的类别视为基础单元，
//! 查询时返回空列表。

use phf::phf_map;

use crate::models::KnowledgePointCategory as KP;

/// 以类别代码为键的静态依赖表
static KNOWLEDGE_POINT_DEPENDENCIES: phf::Map<&'static str, &'static [KP]> = phf_map! {
    "DECIMAL" => &[KP::Integer],
    "FRACTION" => &[KP::Integer, KP::Decimal],
    "VOLUME" => &[KP::Integer, KP::Decimal],
    "DISTANCE" => &[KP::Integer, KP::Decimal],
    "TIME" => &[KP::Integer],
    "PROBLEM_SOLVING" => &[KP::Integer, KP::Decimal, KP::Fraction],
    "AREA_CUBE" => &[KP::Integer, KP::Decimal],
    "GIFTED" => &[KP::Integer, KP::Decimal, KP::Fraction, KP::Pattern],
};

/// 查询某个知识点的前置知识点（有序）
pub fn prerequisites(category: KP) -> &'static [KP] {
    KNOWLEDGE_POINT_DEPENDENCIES
        .get(category.code())
        .copied()
        .unwrap_or(&[])
}
