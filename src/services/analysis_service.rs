//! AI 分析服务 - 业务能力层
//!
//! 评估结果 → 结构化 prompt → 调用一次文本生成 → 解析为 `AIAnalysis`。
//!
//! ## 错误分类
//! - 模型输出不是约定的 JSON：`AnalysisError::InvalidResponseFormat`
//! - 文本生成服务本身失败：`AnalysisError::Generator`，原样透传，不重试

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::clients::TextGenerator;
use crate::error::AnalysisError;
use crate::models::{AIAnalysis, AssessmentResult, KnowledgePointCategory};
use crate::services::dependency_graph;

/// 低于此分数（0～5 分制）视为弱项
pub const WEAKNESS_THRESHOLD: f64 = 3.0;

/// 弱项标记
pub const WEAK_MARKER: &str = "⚠ 弱項";

/// 系统提示词：角色设定 + 输出格式约定
pub const SYSTEM_PROMPT: &str = "\
你是一位國小數學診斷專家，負責根據學生的知識點分數與數學素養分數撰寫診斷報告，請使用繁體中文。

輸出格式：只回傳一個 JSON 物件，不要使用 code fence，也不要附加任何說明文字。
物件恰好包含兩個字串欄位：
{\"weakness_analysis\": \"弱點分析\", \"enhancement_suggestions\": \"強化建議\"}

撰寫要求：
1. 找出低於 3.0 分的項目並說明可能成因
2. 參考前置知識點，判斷弱項是否源自更基礎的單元
3. 建議要具體、可執行，由基礎練習逐步進階
4. 先肯定學生表現好的部分，再引導改善弱項
5. 若全部項目都達 3.0 分，仍指出相對較弱之處並給出精進方向
6. 分數只顯示到小數第二位，是否為弱項以「⚠ 弱項」標記為準";

/// 将评估结果转为结构化文字消息
///
/// 纯函数：同样的评估结果总是得到同样的消息。
pub fn build_user_message(result: &AssessmentResult) -> String {
    let mut lines = vec![
        format!("學生：{}", result.student_name),
        format!("測驗卷：{}", result.exam_id),
        String::new(),
    ];

    lines.push("【知識點能力分數（滿分 5.0）】".to_string());
    let mut weak_categories: Vec<KnowledgePointCategory> = Vec::new();
    for kp in &result.knowledge_point_scores {
        lines.push(score_line(kp.category.name(), kp.score));
        if is_weak(kp.score) {
            weak_categories.push(kp.category);
        }
    }
    lines.push(String::new());

    lines.push("【數學素養分數（滿分 5.0）】".to_string());
    for ml in &result.math_literacy_scores {
        lines.push(score_line(ml.dimension.name(), ml.score));
    }
    lines.push(String::new());

    if !weak_categories.is_empty() {
        lines.push("【弱項的前置知識點】".to_string());
        for category in &weak_categories {
            let deps = dependency_graph::prerequisites(*category);
            if deps.is_empty() {
                continue;
            }
            let dep_names: Vec<&str> = deps.iter().map(|d| d.name()).collect();
            lines.push(format!("  {}：需先掌握 {}", category.name(), dep_names.join("、")));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

/// 解析 LLM 回应，容忍外层的 code fence
pub fn parse_llm_response(raw: &str) -> Result<AIAnalysis, AnalysisError> {
    let text = strip_code_fence(raw);

    let value: Value =
        serde_json::from_str(text).map_err(|e| AnalysisError::invalid_format(e.to_string()))?;
    let object = value
        .as_object()
        .ok_or_else(|| AnalysisError::invalid_format("response is not a JSON object"))?;

    Ok(AIAnalysis {
        weakness_analysis: string_field(object, "weakness_analysis")?,
        enhancement_suggestions: string_field(object, "enhancement_suggestions")?,
    })
}

/// 调用 LLM 产生 AI 分析报告
///
/// 每次只调用一次生成服务，不重试、不设超时，这些策略交给调用方。
pub async fn generate_ai_analysis(
    result: &AssessmentResult,
    generator: &dyn TextGenerator,
) -> Result<AIAnalysis, AnalysisError> {
    let user_message = build_user_message(result);
    debug!(
        "生成 AI 分析: {} / {}，prompt {} 字符",
        result.student_name,
        result.exam_id,
        user_message.chars().count()
    );

    let raw_response = generator
        .generate(SYSTEM_PROMPT, &user_message)
        .await
        .map_err(AnalysisError::Generator)?;

    parse_llm_response(&raw_response).inspect_err(|e| {
        warn!("LLM 回应格式无效 ({}): {}", result.student_name, e);
    })
}

fn is_weak(score: f64) -> bool {
    score < WEAKNESS_THRESHOLD
}

/// 标记按未取整的分数判断，2.995～2.9999 会显示为 "3.00 ⚠ 弱項"
fn score_line(name: &str, score: f64) -> String {
    if is_weak(score) {
        format!("  {}：{:.2} {}", name, score, WEAK_MARKER)
    } else {
        format!("  {}：{:.2}", name, score)
    }
}

/// 去掉 ```json ... ``` 包裹
///
/// 第一行是开头的 fence（可能带语言标记），整行丢弃；结尾 fence 可有可无。
fn strip_code_fence(raw: &str) -> &str {
    let text = raw.trim();
    if !text.starts_with("```") {
        return text;
    }

    let body = text.split_once('\n').map(|(_, rest)| rest).unwrap_or("");
    let body = body.trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}

fn string_field(object: &Map<String, Value>, key: &str) -> Result<String, AnalysisError> {
    match object.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(AnalysisError::invalid_format(format!(
            "field `{}` must be a string, got {}",
            key, other
        ))),
        None => Err(AnalysisError::invalid_format(format!("missing field `{}`", key))),
    }
}
