use thiserror::Error;

/// 研究流程对外暴露的错误分类
///
/// 各生成阶段的模型失败都会在阶段内部通过模板回退消化，不会出现在这里。
/// 只有输入校验失败与真正不可恢复的内部异常会传播给调用方。
#[derive(Debug, Error)]
pub enum ResearchError {
    /// 输入校验失败（研究问题或目标人群为空白）
    #[error("invalid research input: {0}")]
    InvalidInput(String),

    /// 流水线内部不可恢复错误（程序性错误、持久化失败等）
    #[error(transparent)]
    Pipeline(#[from] anyhow::Error),
}
