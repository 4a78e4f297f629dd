//! 研究工作流的固定步骤模板 - 每个会话实例化一份，运行期不增删

use serde_json::json;

use super::WorkflowStep;

/// 构造研究流程的完整步骤图：7个顶层步骤，部分带2-3个子步骤
pub fn research_steps(session_id: &str, research_question: &str) -> Vec<WorkflowStep> {
    vec![
        WorkflowStep::new(
            "setup",
            "Research Setup",
            "Initializing research parameters and validating input",
        )
        .with_metadata("research_question", json!(research_question)),
        WorkflowStep::new(
            "personas",
            "Persona Generation",
            "Creating diverse user personas based on target demographic",
        )
        .with_substeps(vec![
            WorkflowStep::new(
                "personas.analyze",
                "Analyze Demographics",
                "Understanding target user characteristics",
            ),
            WorkflowStep::new(
                "personas.generate",
                "Generate Personas",
                "Creating detailed user personas with unique traits",
            ),
            WorkflowStep::new(
                "personas.validate",
                "Validate Personas",
                "Ensuring persona diversity and relevance",
            ),
        ]),
        WorkflowStep::new(
            "questions",
            "Question Generation",
            "Creating targeted interview questions for research",
        )
        .with_substeps(vec![
            WorkflowStep::new(
                "questions.goals",
                "Analyze Research Goals",
                "Understanding what insights we need to gather",
            ),
            WorkflowStep::new(
                "questions.generate",
                "Generate Questions",
                "Creating open-ended, unbiased interview questions",
            ),
        ]),
        WorkflowStep::new(
            "interviews",
            "Interview Simulation",
            "Conducting AI-powered interviews with generated personas",
        )
        .with_substeps(vec![
            WorkflowStep::new(
                "interviews.execute",
                "Interview Execution",
                "Running personalized interviews with each persona",
            ),
            WorkflowStep::new(
                "interviews.collect",
                "Response Collection",
                "Gathering and organizing interview responses",
            ),
        ]),
        WorkflowStep::new(
            "analysis",
            "Data Analysis",
            "Analyzing interview responses for insights and patterns",
        )
        .with_substeps(vec![
            WorkflowStep::new(
                "analysis.process",
                "Response Processing",
                "Processing and categorizing interview responses",
            ),
            WorkflowStep::new(
                "analysis.patterns",
                "Pattern Recognition",
                "Identifying common themes and insights",
            ),
            WorkflowStep::new(
                "analysis.insights",
                "Insight Generation",
                "Generating actionable insights from data",
            ),
        ]),
        WorkflowStep::new(
            "synthesis",
            "Research Synthesis",
            "Creating comprehensive research summary and recommendations",
        )
        .with_substeps(vec![
            WorkflowStep::new(
                "synthesis.findings",
                "Key Findings",
                "Summarizing the most important discoveries",
            ),
            WorkflowStep::new(
                "synthesis.recommendations",
                "Recommendations",
                "Generating actionable recommendations",
            ),
            WorkflowStep::new(
                "synthesis.report",
                "Report Generation",
                "Creating final research report",
            ),
        ]),
        WorkflowStep::new(
            "storage",
            "Data Storage",
            "Saving research results and making them accessible",
        )
        .with_metadata("session_id", json!(session_id)),
    ]
}
