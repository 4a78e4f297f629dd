//! 研究流程跟踪 - 为进行中的研究会话提供逐步骤的进度与耗时快照
//!
//! 跟踪器是数据流水线的旁路：它从不阻塞或改变流水线本身，但每个阶段都会
//! 向它报到，使外部观察者可以在流水线执行的同时轮询研究进度。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

pub mod registry;
pub mod steps;

pub use registry::WorkflowRegistry;

/// 步骤状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Pending,
    Running,
    Completed,
    Failed,
    Skipped,
}

impl StepStatus {
    /// 显式状态转移表。非法转移（如 running → running）一律拒绝，
    /// 避免重复start悄悄覆盖计时数据
    pub fn can_transition(self, next: StepStatus) -> bool {
        matches!(
            (self, next),
            (StepStatus::Pending, StepStatus::Running)
                | (StepStatus::Pending, StepStatus::Skipped)
                | (StepStatus::Running, StepStatus::Completed)
                | (StepStatus::Running, StepStatus::Failed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            StepStatus::Completed | StepStatus::Failed | StepStatus::Skipped
        )
    }
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StepStatus::Pending => "pending",
            StepStatus::Running => "running",
            StepStatus::Completed => "completed",
            StepStatus::Failed => "failed",
            StepStatus::Skipped => "skipped",
        };
        write!(f, "{}", name)
    }
}

/// 工作流步骤。步骤图在跟踪器构造时固定，实践中只用到一层嵌套
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowStep {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: StepStatus,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    /// 仅当start_time与end_time同时存在时设置
    pub duration_ms: Option<i64>,
    pub metadata: HashMap<String, Value>,
    /// 仅当status为failed时设置
    pub error_message: Option<String>,
    pub substeps: Vec<WorkflowStep>,
}

impl WorkflowStep {
    pub fn new(id: &str, name: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            status: StepStatus::Pending,
            start_time: None,
            end_time: None,
            duration_ms: None,
            metadata: HashMap::new(),
            error_message: None,
            substeps: Vec::new(),
        }
    }

    pub fn with_substeps(mut self, substeps: Vec<WorkflowStep>) -> Self {
        self.substeps = substeps;
        self
    }

    pub fn with_metadata(mut self, key: &str, value: Value) -> Self {
        self.metadata.insert(key.to_string(), value);
        self
    }

    /// 结束步骤，派生duration_ms
    fn finish(&mut self, status: StepStatus) {
        self.status = status;
        self.end_time = Some(Utc::now());
        if let (Some(start), Some(end)) = (self.start_time, self.end_time) {
            self.duration_ms = Some((end - start).num_milliseconds());
        }
    }
}

/// 进度快照，供轮询方读取
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowProgress {
    pub workflow_id: String,
    pub session_id: String,
    pub research_question: String,
    /// 已完成顶层步骤占比，保留1位小数，单调不减且不超过100
    pub progress_percentage: f64,
    pub total_steps: usize,
    pub completed_steps: usize,
    pub running_steps: usize,
    pub failed_steps: usize,
    pub current_step: Option<WorkflowStep>,
    pub start_time: DateTime<Utc>,
    pub estimated_completion: Option<DateTime<Utc>>,
    pub steps: Vec<WorkflowStep>,
}

/// 工作流跟踪器 - 每个活跃研究会话一个实例
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowTracker {
    pub session_id: String,
    pub research_question: String,
    pub workflow_id: String,
    pub start_time: DateTime<Utc>,
    steps: Vec<WorkflowStep>,
}

impl WorkflowTracker {
    pub fn new(session_id: &str, research_question: &str) -> Self {
        let workflow_id = format!(
            "workflow_{}",
            &uuid::Uuid::new_v4().simple().to_string()[..8]
        );

        Self {
            session_id: session_id.to_string(),
            research_question: research_question.to_string(),
            workflow_id,
            start_time: Utc::now(),
            steps: steps::research_steps(session_id, research_question),
        }
    }

    /// 启动一个步骤，合并传入的元数据
    pub fn start_step(&mut self, step_id: &str, metadata: Option<HashMap<String, Value>>) -> bool {
        let Some(step) = self.find_step_mut(step_id) else {
            eprintln!("⚠️ 步骤 {} 不存在", step_id);
            return false;
        };

        if !step.status.can_transition(StepStatus::Running) {
            eprintln!(
                "⚠️ 步骤 {} 处于 {} 状态，忽略非法的启动请求",
                step_id, step.status
            );
            return false;
        }

        step.status = StepStatus::Running;
        step.start_time = Some(Utc::now());
        if let Some(metadata) = metadata {
            step.metadata.extend(metadata);
        }
        true
    }

    /// 完成一个步骤，记录耗时并合并元数据
    pub fn complete_step(
        &mut self,
        step_id: &str,
        metadata: Option<HashMap<String, Value>>,
    ) -> bool {
        let Some(step) = self.find_step_mut(step_id) else {
            eprintln!("⚠️ 步骤 {} 不存在", step_id);
            return false;
        };

        if !step.status.can_transition(StepStatus::Completed) {
            eprintln!(
                "⚠️ 步骤 {} 处于 {} 状态，忽略非法的完成请求",
                step_id, step.status
            );
            return false;
        }

        step.finish(StepStatus::Completed);
        if let Some(metadata) = metadata {
            step.metadata.extend(metadata);
        }
        true
    }

    /// 将一个步骤标记为失败
    pub fn fail_step(&mut self, step_id: &str, error_message: &str) -> bool {
        let Some(step) = self.find_step_mut(step_id) else {
            eprintln!("⚠️ 步骤 {} 不存在", step_id);
            return false;
        };

        if !step.status.can_transition(StepStatus::Failed) {
            eprintln!(
                "⚠️ 步骤 {} 处于 {} 状态，忽略非法的失败标记",
                step_id, step.status
            );
            return false;
        }

        step.finish(StepStatus::Failed);
        step.error_message = Some(error_message.to_string());
        true
    }

    /// 跳过一个尚未启动的步骤（为条件步骤保留的终态）
    pub fn skip_step(&mut self, step_id: &str) -> bool {
        let Some(step) = self.find_step_mut(step_id) else {
            eprintln!("⚠️ 步骤 {} 不存在", step_id);
            return false;
        };

        if !step.status.can_transition(StepStatus::Skipped) {
            eprintln!(
                "⚠️ 步骤 {} 处于 {} 状态，忽略非法的跳过请求",
                step_id, step.status
            );
            return false;
        }

        step.status = StepStatus::Skipped;
        true
    }

    /// 向运行中的步骤合并元数据，不触碰计时
    pub fn update_step_metadata(&mut self, step_id: &str, metadata: HashMap<String, Value>) -> bool {
        let Some(step) = self.find_step_mut(step_id) else {
            eprintln!("⚠️ 步骤 {} 不存在", step_id);
            return false;
        };

        step.metadata.extend(metadata);
        true
    }

    /// 按id查找步骤，覆盖顶层与一层嵌套的子步骤（扁平命名空间）
    fn find_step_mut(&mut self, step_id: &str) -> Option<&mut WorkflowStep> {
        for step in &mut self.steps {
            if step.id == step_id {
                return Some(step);
            }
            for substep in &mut step.substeps {
                if substep.id == step_id {
                    return Some(substep);
                }
            }
        }
        None
    }

    /// 当前运行中的顶层步骤（按声明顺序的首个匹配）
    pub fn get_current_step(&self) -> Option<&WorkflowStep> {
        self.steps
            .iter()
            .find(|step| step.status == StepStatus::Running)
    }

    /// 是否仍有运行中的步骤
    pub fn is_active(&self) -> bool {
        self.steps
            .iter()
            .any(|step| step.status == StepStatus::Running)
    }

    /// 已结束顶层步骤的总耗时（毫秒）
    pub fn get_total_duration(&self) -> i64 {
        self.steps.iter().filter_map(|step| step.duration_ms).sum()
    }

    /// 根据已完成步骤的平均耗时估算完成时间
    pub fn get_estimated_completion(&self) -> Option<DateTime<Utc>> {
        let completed_count = self
            .steps
            .iter()
            .filter(|step| step.status == StepStatus::Completed)
            .count();
        if completed_count == 0 {
            return None;
        }

        let remaining_steps = self.steps.len() - completed_count;
        if remaining_steps == 0 {
            return None;
        }

        let avg_step_duration = self.get_total_duration() / completed_count as i64;
        let estimated_remaining_ms = avg_step_duration * remaining_steps as i64;
        Some(Utc::now() + chrono::Duration::milliseconds(estimated_remaining_ms))
    }

    /// 获取当前进度快照
    pub fn get_progress(&self) -> WorkflowProgress {
        let total_steps = self.steps.len();
        let completed_steps = self
            .steps
            .iter()
            .filter(|step| step.status == StepStatus::Completed)
            .count();
        let running_steps = self
            .steps
            .iter()
            .filter(|step| step.status == StepStatus::Running)
            .count();
        let failed_steps = self
            .steps
            .iter()
            .filter(|step| step.status == StepStatus::Failed)
            .count();

        let progress_percentage = if total_steps > 0 {
            let raw = completed_steps as f64 / total_steps as f64 * 100.0;
            (raw * 10.0).round() / 10.0
        } else {
            0.0
        };

        WorkflowProgress {
            workflow_id: self.workflow_id.clone(),
            session_id: self.session_id.clone(),
            research_question: self.research_question.clone(),
            progress_percentage,
            total_steps,
            completed_steps,
            running_steps,
            failed_steps,
            current_step: self.get_current_step().cloned(),
            start_time: self.start_time,
            estimated_completion: self.get_estimated_completion(),
            steps: self.steps.clone(),
        }
    }

    /// 全部步骤（含子步骤）
    pub fn steps(&self) -> &[WorkflowStep] {
        &self.steps
    }
}
