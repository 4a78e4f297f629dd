//! 画像生成阶段

use serde_json::Value;

use crate::llm::GenerationIntent;
use crate::llm::fallback::personas as persona_templates;
use crate::pipeline::context::ResearchContext;
use crate::types::{Persona, ResearchRequest};

/// 画像生成器
///
/// 主路径要求模型返回带 `personas` 数组的JSON对象；任何形态校验失败都会
/// 整体落到人群关键词模板。模型返回的画像多于请求数量时截断，少于请求
/// 数量时按原样接受 - 调用方会进行更少的访谈（best-effort语义，刻意不
/// 补齐也不报错）。
#[derive(Default)]
pub struct PersonaSynthesizer;

impl PersonaSynthesizer {
    /// 生成画像，结果数量不超过 `num_interviews`
    pub async fn synthesize(
        &self,
        context: &ResearchContext,
        request: &ResearchRequest,
    ) -> Vec<Persona> {
        let prompt = build_persona_prompt(request);
        let response = context
            .text_generator
            .generate(GenerationIntent::Personas, &prompt)
            .await;

        let mut personas = match parse_personas(&response) {
            Ok(personas) => personas,
            Err(reason) => {
                println!(
                    "   ⚠️ 画像响应校验失败({})，使用人群模板回退: {}",
                    request.target_demographic, reason
                );
                let template_json = persona_templates::generate(&request.target_demographic);
                parse_personas(&template_json).unwrap_or_default()
            }
        };

        personas.truncate(request.num_interviews);
        personas
    }
}

/// 构建画像生成prompt
fn build_persona_prompt(request: &ResearchRequest) -> String {
    format!(
        r#"Generate exactly {num} unique personas for interviews about {question}.

Each persona should belong to the target demographic: {demographic}

For each persona, provide:
- name: Full name
- age: Age in years
- job: Job title or role
- traits: 3-4 personality traits
- communication_style: How this person communicates
- background: One background detail shaping their perspective

Respond in JSON format with a "personas" array."#,
        num = request.num_interviews,
        question = request.research_question,
        demographic = request.target_demographic,
    )
}

/// 解析并校验画像JSON
///
/// 拒绝条件：响应不是 `{...}` 形态、JSON解析失败、`personas` 数组缺失或
/// 为空、任一元素不是至少含 `name` 与 `age` 的对象。
pub(crate) fn parse_personas(response: &str) -> Result<Vec<Persona>, String> {
    let trimmed = response.trim();

    if !trimmed.starts_with('{') || !trimmed.ends_with('}') {
        return Err("response is not a JSON object".to_string());
    }

    let value: Value =
        serde_json::from_str(trimmed).map_err(|e| format!("invalid JSON: {}", e))?;

    let Some(entries) = value.get("personas").and_then(Value::as_array) else {
        return Err("missing personas array".to_string());
    };
    if entries.is_empty() {
        return Err("personas array is empty".to_string());
    }

    for entry in entries {
        let valid = entry.is_object()
            && entry.get("name").and_then(Value::as_str).is_some_and(|name| !name.is_empty())
            && entry.get("age").and_then(Value::as_u64).is_some_and(|age| age > 0);
        if !valid {
            return Err("persona entry missing name or age".to_string());
        }
    }

    entries
        .iter()
        .map(|entry| {
            serde_json::from_value::<Persona>(entry.clone())
                .map_err(|e| format!("invalid persona structure: {}", e))
        })
        .collect()
}
