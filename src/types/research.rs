use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ResearchError;

/// 研究请求 - 一次研究会话的不可变输入
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchRequest {
    /// 研究问题
    pub research_question: String,
    /// 目标人群
    pub target_demographic: String,
    /// 访谈人数（即画像数量）
    pub num_interviews: usize,
    /// 每场访谈的问题数量
    pub num_questions: usize,
}

impl ResearchRequest {
    pub fn new(
        research_question: impl Into<String>,
        target_demographic: impl Into<String>,
        num_interviews: usize,
        num_questions: usize,
    ) -> Self {
        Self {
            research_question: research_question.into(),
            target_demographic: target_demographic.into(),
            num_interviews,
            num_questions,
        }
    }

    /// 校验输入，空白的研究问题或目标人群直接拒绝
    pub fn validate(&self) -> Result<(), ResearchError> {
        if self.research_question.trim().is_empty() {
            return Err(ResearchError::InvalidInput(
                "research question cannot be empty".to_string(),
            ));
        }
        if self.target_demographic.trim().is_empty() {
            return Err(ResearchError::InvalidInput(
                "target demographic cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// 合成画像 - 用于条件化模型回答的虚拟受访者
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    /// 姓名
    pub name: String,
    /// 年龄
    pub age: u32,
    /// 职位
    #[serde(default)]
    pub job: String,
    /// 3-4个性格特质，前3个在派生视图中作为动机，其余作为痛点
    #[serde(default)]
    pub traits: Vec<String>,
    /// 沟通风格
    #[serde(default)]
    pub communication_style: String,
    /// 一句塑造其视角的背景描述
    #[serde(default)]
    pub background: String,
}

impl Persona {
    /// 角色描述，如 "29-year-old Senior Software Engineer"
    pub fn role(&self) -> String {
        format!("{}-year-old {}", self.age, self.job)
    }

    /// 派生视图：前3个特质作为动机
    pub fn motivations(&self) -> &[String] {
        let n = self.traits.len().min(3);
        &self.traits[..n]
    }

    /// 派生视图：第4个起的特质作为痛点，没有则给出固定占位说明
    pub fn pain_points(&self) -> Vec<String> {
        if self.traits.len() > 3 {
            self.traits[3..].to_vec()
        } else {
            vec!["No specific pain points identified".to_string()]
        }
    }
}

/// 单条问答记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

/// 一场完整访谈，归属于唯一的（会话，画像）组合
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interview {
    pub persona: Persona,
    /// 按问题顺序排列，完成时长度等于问题数
    pub responses: Vec<QaPair>,
}

/// 详细问答视图中的画像卡片
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaCard {
    pub name: String,
    pub role: String,
    pub background: String,
    pub traits: String,
    pub communication_style: String,
}

/// 按访谈展开的详细问答段落
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewCard {
    pub interview_number: usize,
    pub persona: PersonaCard,
    pub qa_pairs: Vec<QaPair>,
}

impl InterviewCard {
    pub fn from_interview(number: usize, interview: &Interview) -> Self {
        let persona = &interview.persona;
        Self {
            interview_number: number,
            persona: PersonaCard {
                name: persona.name.clone(),
                role: persona.role(),
                background: persona.background.clone(),
                traits: persona.traits.join(", "),
                communication_style: persona.communication_style.clone(),
            },
            qa_pairs: interview.responses.clone(),
        }
    }
}

/// 研究结果元信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchMetadata {
    pub total_questions: usize,
    pub total_personas: usize,
    pub total_responses: usize,
    pub analysis_depth: String,
    pub research_type: String,
}

/// 一次研究会话的完整产出，作为原子单元交给持久化层
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchResult {
    pub session_id: String,
    pub workflow_id: String,
    pub created_at: DateTime<Utc>,
    pub research_question: String,
    pub target_demographic: String,
    pub num_interviews: usize,
    pub interview_questions: Vec<String>,
    pub personas: Vec<Persona>,
    pub interviews: Vec<Interview>,
    pub detailed_qa: Vec<InterviewCard>,
    pub synthesis: String,
    pub metadata: ResearchMetadata,
}

/// 生成进程内唯一的会话标识，如 `research_20260807_103000_1a2b3c4d`
pub fn new_session_id() -> String {
    let stamp = Utc::now().format("%Y%m%d_%H%M%S");
    let suffix = &uuid::Uuid::new_v4().simple().to_string()[..8];
    format!("research_{}_{}", stamp, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_persona(traits: Vec<&str>) -> Persona {
        Persona {
            name: "Jordan Kim".to_string(),
            age: 29,
            job: "Senior Software Engineer".to_string(),
            traits: traits.into_iter().map(String::from).collect(),
            communication_style: "direct and technical".to_string(),
            background: "7 years full-stack experience".to_string(),
        }
    }

    #[test]
    fn test_request_validation() {
        let ok = ResearchRequest::new("How do teams debug?", "software engineers", 2, 3);
        assert!(ok.validate().is_ok());

        let empty_question = ResearchRequest::new("   ", "software engineers", 2, 3);
        assert!(matches!(
            empty_question.validate(),
            Err(ResearchError::InvalidInput(_))
        ));

        let empty_demographic = ResearchRequest::new("How do teams debug?", "", 2, 3);
        assert!(matches!(
            empty_demographic.validate(),
            Err(ResearchError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_persona_role() {
        let persona = sample_persona(vec!["analytical"]);
        assert_eq!(persona.role(), "29-year-old Senior Software Engineer");
    }

    #[test]
    fn test_persona_trait_views() {
        let persona = sample_persona(vec!["analytical", "curious", "pragmatic", "impatient"]);
        assert_eq!(persona.motivations(), &["analytical", "curious", "pragmatic"]);
        assert_eq!(persona.pain_points(), vec!["impatient".to_string()]);

        let short = sample_persona(vec!["analytical", "curious"]);
        assert_eq!(short.motivations().len(), 2);
        assert_eq!(
            short.pain_points(),
            vec!["No specific pain points identified".to_string()]
        );
    }

    #[test]
    fn test_interview_card() {
        let persona = sample_persona(vec!["analytical", "curious", "pragmatic"]);
        let interview = Interview {
            persona: persona.clone(),
            responses: vec![QaPair {
                question: "What tools do you use?".to_string(),
                answer: "Mostly profilers and logs.".to_string(),
            }],
        };

        let card = InterviewCard::from_interview(1, &interview);
        assert_eq!(card.interview_number, 1);
        assert_eq!(card.persona.role, persona.role());
        assert_eq!(card.persona.traits, "analytical, curious, pragmatic");
        assert_eq!(card.qa_pairs.len(), 1);
    }

    #[test]
    fn test_session_id_format() {
        let id = new_session_id();
        assert!(id.starts_with("research_"));

        let other = new_session_id();
        assert_ne!(id, other);
    }
}
