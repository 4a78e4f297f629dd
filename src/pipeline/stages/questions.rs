//! 问题生成阶段

use regex::Regex;

use crate::llm::GenerationIntent;
use crate::pipeline::context::ResearchContext;
use crate::types::ResearchRequest;

/// 单个问题的长度上限，超出视为模型把指令回显进了答案
const MAX_QUESTION_LEN: usize = 200;

/// 模型回显指令时会泄露的片段，含有任意一个即拒绝该候选行
const PROMPT_ARTIFACTS: [&str; 5] = [
    "Requirements:",
    "Generate",
    "Format:",
    "Topic:",
    "Target Audience:",
];

/// 问题生成器
///
/// 主路径让模型按行产出指定数量的开放式问题；解析后存活的候选不足时，
/// 丢弃全部候选并整体落到话题模板，绝不混用两条路径的产物。
#[derive(Default)]
pub struct QuestionSynthesizer;

impl QuestionSynthesizer {
    /// 生成访谈问题，结果长度恰好为 `num_questions`
    pub async fn synthesize(
        &self,
        context: &ResearchContext,
        request: &ResearchRequest,
    ) -> Vec<String> {
        let prompt = build_question_prompt(request);
        let response = context
            .text_generator
            .generate(GenerationIntent::Questions, &prompt)
            .await;

        let valid_questions = parse_questions(&response);

        if valid_questions.len() < request.num_questions {
            println!(
                "   ⚠️ 有效问题不足 ({}/{})，使用话题模板回退",
                valid_questions.len(),
                request.num_questions
            );
            return fallback_questions(&request.research_question, request.num_questions);
        }

        valid_questions
            .into_iter()
            .take(request.num_questions)
            .collect()
    }
}

/// 构建问题生成prompt
fn build_question_prompt(request: &ResearchRequest) -> String {
    format!(
        r#"Generate exactly {num} high-quality, in-depth interview questions about: {question}

Requirements:
- Each question must be open-ended and thought-provoking (not yes/no)
- Questions should explore different aspects: current practices, specific challenges, decision-making process, ideal solutions, and future perspectives
- Focus on understanding user experience, pain points, motivations, workflows, and unmet needs
- Questions should be specifically tailored to {demographic}
- Avoid generic questions - make them highly specific to the research topic and audience
- Each question should elicit detailed, informative responses that reveal insights

Topic: {question}
Target Audience: {demographic}

Format: Provide each question on a separate line, numbered.
Make each question comprehensive and specific to generate rich, detailed responses."#,
        num = request.num_questions,
        question = request.research_question,
        demographic = request.target_demographic,
    )
}

/// 将模型原始输出解析为合法问题行
///
/// 候选被拒绝的条件：含指令回显片段、超长、不以问号结尾。
pub(crate) fn parse_questions(raw: &str) -> Vec<String> {
    let number_prefix = Regex::new(r"^\s*\d+[.)]\s*").expect("valid regex literal");

    raw.lines()
        .map(|line| number_prefix.replace(line.trim(), "").to_string())
        .filter(|line| !line.is_empty())
        .filter(|line| {
            !PROMPT_ARTIFACTS
                .iter()
                .any(|artifact| line.contains(artifact))
        })
        .filter(|line| line.len() < MAX_QUESTION_LEN)
        .filter(|line| line.ends_with('?'))
        .collect()
}

/// 话题关键词模板回退，产出数量恰好为 `num` 的问题
pub(crate) fn fallback_questions(research_question: &str, num: usize) -> Vec<String> {
    let topic_lower = research_question.to_lowercase();

    let mut questions: Vec<String> = if topic_lower.contains("debug") || topic_lower.contains("production")
    {
        vec![
            "What tools and techniques do you currently use for debugging production issues?",
            "How do you prioritize and triage critical production problems?",
            "What challenges do you face when debugging issues in live environments?",
            "How has your debugging approach evolved over your career?",
            "What would make production debugging easier for you?",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    } else if topic_lower.contains("mobile")
        || (topic_lower.contains("app") && topic_lower.contains("test"))
    {
        vec![
            "What testing frameworks and tools do you use for mobile app development?",
            "How do you handle testing across different devices and platforms?",
            "What are the biggest challenges in mobile app testing?",
            "How do you ensure app performance across various devices?",
            "What testing practices have been most effective in your experience?",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    } else if topic_lower.contains("ai") || topic_lower.contains("chatbot") {
        vec![
            "How do you integrate AI tools into your development workflow?",
            "What challenges have you encountered when implementing AI features?",
            "How do you evaluate the effectiveness of AI solutions?",
            "What concerns do you have about AI in software development?",
            "How has AI changed your approach to problem-solving?",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    } else {
        vec![
            format!(
                "How do you currently approach {} in your work?",
                topic_lower
            ),
            format!(
                "What are the main challenges you face with {}?",
                topic_lower
            ),
            "What tools or methods have you found most effective?".to_string(),
            "How would you improve the current process?".to_string(),
            "What advice would you give to someone new to this area?".to_string(),
        ]
    };

    // 请求数量超过模板库存时补充编号追问，保证恰好num个且互不重复
    while questions.len() < num {
        let index = questions.len() + 1;
        questions.push(format!(
            "Is there anything else about {} that the previous {} questions have not covered yet?",
            topic_lower,
            index - 1
        ));
    }

    questions.truncate(num);
    questions
}
