use anyhow::Result;
use clap::Parser;

use userlens_rs::pipeline::{ResearchContext, run_research};

#[tokio::main]
async fn main() -> Result<()> {
    let args = userlens_rs::cli::Args::parse();
    let (config, request) = args.into_parts();

    let context = ResearchContext::new(config);
    let result = run_research(&context, request).await?;

    println!("\n{}", "=".repeat(60));
    println!("🎯 研究洞察报告");
    println!("{}", "=".repeat(60));
    println!("研究问题: {}", result.research_question);
    println!("目标人群: {}", result.target_demographic);
    println!("访谈数量: {}", result.num_interviews);
    println!("{}", "-".repeat(60));
    println!("{}", result.synthesis);
    println!("{}", "=".repeat(60));

    if let Some(progress) = context.registry.progress(&result.session_id).await {
        println!(
            "📈 工作流 {} 完成度 {:.1}%（{}/{} 步骤）",
            progress.workflow_id,
            progress.progress_percentage,
            progress.completed_steps,
            progress.total_steps
        );
    }

    Ok(())
}
