//! 研究流水线编排
//!
//! 单次研究请求在此按固定顺序执行：输入校验 → 问题生成 → 画像生成 →
//! 逐画像访谈 → 数据分析与综合 → 结果持久化。流程严格串行，工作流
//! 跟踪器作为旁路记录每个阶段的进度，供外部并发轮询。

use chrono::Utc;
use serde_json::{Value, json};
use std::collections::HashMap;

use crate::error::ResearchError;
use crate::types::{
    InterviewCard, ResearchMetadata, ResearchRequest, ResearchResult, new_session_id,
};
use crate::workflow::registry::SharedTracker;

pub mod context;
pub mod stages;

pub use context::{MemoryScope, ResearchContext, ScopedKeys};

use stages::{InterviewConductor, PersonaSynthesizer, QuestionSynthesizer, SynthesisEngine};

/// 执行一次完整的研究流程
///
/// 只会因输入校验失败或不可恢复的内部异常返回错误；各生成阶段的模型
/// 失效都在阶段内部静默回退。异常传播前会把正在运行的工作流步骤标记
/// 为失败，便于轮询方定位。
pub async fn run_research(
    context: &ResearchContext,
    request: ResearchRequest,
) -> Result<ResearchResult, ResearchError> {
    let session_id = new_session_id();
    let tracker = context
        .registry
        .create(&session_id, &request.research_question)
        .await;

    match execute_pipeline(context, &request, &session_id, &tracker).await {
        Ok(result) => Ok(result),
        Err(err) => {
            // 把异常归因到正在执行的步骤
            let mut tracker = tracker.write().await;
            if let Some(step_id) = tracker.get_current_step().map(|step| step.id.clone()) {
                tracker.fail_step(&step_id, &err.to_string());
            }
            Err(err)
        }
    }
}

async fn execute_pipeline(
    context: &ResearchContext,
    request: &ResearchRequest,
    session_id: &str,
    tracker: &SharedTracker,
) -> Result<ResearchResult, ResearchError> {
    println!("🔧 研究配置: {}", request.research_question);
    println!(
        "📊 计划进行 {} 场访谈，每场 {} 个问题",
        request.num_interviews, request.num_questions
    );

    // 第一步：输入校验
    tracker.write().await.start_step(
        "setup",
        Some(meta([
            ("research_question", json!(request.research_question)),
            ("target_demographic", json!(request.target_demographic)),
            ("num_interviews", json!(request.num_interviews)),
        ])),
    );

    if let Err(err) = request.validate() {
        tracker.write().await.fail_step("setup", &err.to_string());
        return Err(err);
    }
    tracker.write().await.complete_step("setup", None);

    // 第二步：生成访谈问题
    println!("📝 生成访谈问题...");
    {
        let mut tracker = tracker.write().await;
        tracker.start_step("questions", None);
        tracker.start_step("questions.goals", None);
    }

    let questions = QuestionSynthesizer
        .synthesize(context, request)
        .await;
    println!("   ✓ 生成 {} 个问题", questions.len());

    context
        .store_to_memory(MemoryScope::RESEARCH, ScopedKeys::QUESTIONS, &questions)
        .await?;

    {
        let mut tracker = tracker.write().await;
        tracker.complete_step("questions.goals", None);
        tracker.start_step(
            "questions.generate",
            Some(meta([("num_questions", json!(questions.len()))])),
        );
        tracker.complete_step("questions.generate", None);
        tracker.complete_step("questions", None);
    }

    // 第三步：生成画像
    println!("👥 生成 {} 个用户画像...", request.num_interviews);
    {
        let mut tracker = tracker.write().await;
        tracker.start_step("personas", None);
        tracker.start_step("personas.analyze", None);
        tracker.complete_step("personas.analyze", None);
        tracker.start_step("personas.generate", None);
    }

    let personas = PersonaSynthesizer.synthesize(context, request).await;
    for (i, persona) in personas.iter().enumerate() {
        println!("   画像 {}: {}", i + 1, persona.name);
    }

    context
        .store_to_memory(MemoryScope::RESEARCH, ScopedKeys::PERSONAS, &personas)
        .await?;

    {
        let mut tracker = tracker.write().await;
        tracker.complete_step(
            "personas.generate",
            Some(meta([("num_personas", json!(personas.len()))])),
        );
        tracker.start_step("personas.validate", None);
        tracker.complete_step("personas.validate", None);
        tracker.complete_step("personas", None);
    }

    // 第四步：逐画像执行访谈（严格串行）
    {
        let mut tracker = tracker.write().await;
        tracker.start_step("interviews", None);
        tracker.start_step(
            "interviews.execute",
            Some(meta([("num_interviews", json!(personas.len()))])),
        );
    }

    let conductor = InterviewConductor;
    let mut interviews = Vec::with_capacity(personas.len());
    for (i, persona) in personas.iter().enumerate() {
        println!(
            "💬 访谈 {}/{} - {}",
            i + 1,
            personas.len(),
            persona.name
        );
        tracker.write().await.update_step_metadata(
            "interviews.execute",
            meta([
                ("current_persona", json!(persona.name)),
                (
                    "interview_progress",
                    json!(format!("{}/{}", i + 1, personas.len())),
                ),
            ]),
        );

        let interview = conductor
            .conduct_interview(context, persona, &questions)
            .await;
        interviews.push(interview);
    }

    context
        .store_to_memory(MemoryScope::RESEARCH, ScopedKeys::INTERVIEWS, &interviews)
        .await?;

    {
        let mut tracker = tracker.write().await;
        tracker.complete_step("interviews.execute", None);
        tracker.start_step("interviews.collect", None);
        tracker.complete_step("interviews.collect", None);
        tracker.complete_step("interviews", None);
    }

    // 第五步：数据分析与综合
    println!("🧠 分析全部访谈内容...");
    {
        let mut tracker = tracker.write().await;
        tracker.start_step("analysis", None);
        tracker.start_step("analysis.process", None);
        tracker.complete_step("analysis.process", None);
        tracker.start_step("analysis.patterns", None);
        tracker.complete_step("analysis.patterns", None);
        tracker.start_step("analysis.insights", None);
    }

    let synthesis = SynthesisEngine
        .synthesize(context, request, &interviews)
        .await;

    context
        .store_to_memory(MemoryScope::RESEARCH, ScopedKeys::SYNTHESIS, &synthesis)
        .await?;

    {
        let mut tracker = tracker.write().await;
        tracker.complete_step("analysis.insights", None);
        tracker.complete_step("analysis", None);
    }

    // 第六步：汇编研究报告
    {
        let mut tracker = tracker.write().await;
        tracker.start_step("synthesis", None);
        tracker.start_step("synthesis.findings", None);
        tracker.complete_step("synthesis.findings", None);
        tracker.start_step("synthesis.recommendations", None);
        tracker.complete_step("synthesis.recommendations", None);
        tracker.start_step("synthesis.report", None);
    }

    let detailed_qa: Vec<InterviewCard> = interviews
        .iter()
        .enumerate()
        .map(|(i, interview)| InterviewCard::from_interview(i + 1, interview))
        .collect();

    let workflow_id = tracker.read().await.workflow_id.clone();
    let total_responses = interviews
        .iter()
        .map(|interview| interview.responses.len())
        .sum();

    let result = ResearchResult {
        session_id: session_id.to_string(),
        workflow_id,
        created_at: Utc::now(),
        research_question: request.research_question.clone(),
        target_demographic: request.target_demographic.clone(),
        num_interviews: interviews.len(),
        interview_questions: questions.clone(),
        personas: personas.clone(),
        interviews,
        detailed_qa,
        synthesis,
        metadata: ResearchMetadata {
            total_questions: questions.len(),
            total_personas: personas.len(),
            total_responses,
            analysis_depth: "comprehensive".to_string(),
            research_type: "ai_powered_user_interviews".to_string(),
        },
    };

    {
        let mut tracker = tracker.write().await;
        tracker.complete_step("synthesis.report", None);
        tracker.complete_step("synthesis", None);
    }

    // 第七步：持久化
    {
        let mut tracker = tracker.write().await;
        tracker.start_step("storage", Some(meta([("session_id", json!(session_id))])));
    }

    context.store.save(&result).await?;

    tracker.write().await.complete_step("storage", None);

    println!(
        "✅ 研究完成: {} 场访谈，会话 {}",
        result.num_interviews, session_id
    );

    Ok(result)
}

fn meta<const N: usize>(pairs: [(&str, Value); N]) -> HashMap<String, Value> {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}
