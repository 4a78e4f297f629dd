//! 确定性模板生成 - 模型后端不可用或失效时的回退路径
//!
//! 回退内容按调用方传入的意图标签分发。prompt文本仅用于提取话题与人群等
//! 参数化信息，不参与意图判断。

use regex::Regex;

use crate::llm::GenerationIntent;

pub mod interviews;
pub mod personas;
pub mod questions;
pub mod synthesis;

/// 未归类请求的兜底回复，综合分析阶段的质量门也用它识别低质量输出
pub const GENERIC_FALLBACK: &str =
    "I understand your request and will provide relevant insights based on the research context.";

/// 根据意图标签生成确定性模板响应
pub fn respond(intent: GenerationIntent, prompt: &str) -> String {
    match intent {
        GenerationIntent::Questions => questions::generate(&extract_research_topic(prompt)),
        GenerationIntent::Personas => personas::generate(&extract_demographic(prompt)),
        GenerationIntent::InterviewAnswer => interviews::generate(prompt),
        GenerationIntent::Synthesis => synthesis::generate(prompt),
        GenerationIntent::General => GENERIC_FALLBACK.to_string(),
    }
}

/// 从prompt中提取研究话题
pub(crate) fn extract_research_topic(prompt: &str) -> String {
    first_capture(
        prompt,
        &[
            r"(?i)about:\s*([^\n.]+)",
            r"(?i)questions about\s+([^\n.]+)",
            r"(?i)topic:\s*([^\n.]+)",
        ],
    )
    .unwrap_or_else(|| "the research topic".to_string())
}

/// 从prompt中提取目标人群
pub(crate) fn extract_demographic(prompt: &str) -> String {
    first_capture(
        prompt,
        &[
            r"(?i)target demographic:\s*([^\n.]+)",
            r"(?i)belong to the target demographic:\s*([^\n.]+)",
            r"(?i)demographic:\s*([^\n.]+)",
        ],
    )
    .unwrap_or_else(|| "professionals".to_string())
}

fn first_capture(prompt: &str, patterns: &[&str]) -> Option<String> {
    for pattern in patterns {
        if let Ok(re) = Regex::new(pattern)
            && let Some(caps) = re.captures(prompt)
            && let Some(matched) = caps.get(1)
        {
            let text = matched.as_str().trim();
            if !text.is_empty() {
                return Some(text.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_research_topic() {
        let prompt = "Generate exactly 5 interview questions about: developer productivity\n\nRequirements:";
        assert_eq!(extract_research_topic(prompt), "developer productivity");

        assert_eq!(
            extract_research_topic("no recognizable cue here"),
            "the research topic"
        );
    }

    #[test]
    fn test_extract_demographic() {
        let prompt =
            "Each persona should belong to the target demographic: software engineers\n\nFor each persona";
        assert_eq!(extract_demographic(prompt), "software engineers");

        assert_eq!(extract_demographic("nothing useful"), "professionals");
    }

    #[test]
    fn test_respond_is_deterministic_per_intent() {
        let prompt = "Generate exactly 5 interview questions about: chip design. Target Audience: hardware engineers";

        let first = respond(GenerationIntent::Questions, prompt);
        let second = respond(GenerationIntent::Questions, prompt);
        assert_eq!(first, second);
        assert!(!first.trim().is_empty());

        assert_eq!(
            respond(GenerationIntent::General, prompt),
            GENERIC_FALLBACK
        );
    }

    #[test]
    fn test_intent_dispatch_ignores_overlapping_keywords() {
        // 综合分析的prompt同样包含interview字样，但意图标签决定了回退类型
        let prompt = "Analyze these 2 user interviews about \"AI tools\" among software engineers.\nResearch Question: AI tools";

        let synthesis = respond(GenerationIntent::Synthesis, prompt);
        assert!(synthesis.contains("KEY THEMES"));

        let personas = respond(GenerationIntent::Personas, prompt);
        assert!(personas.trim_start().starts_with('{'));
    }
}
