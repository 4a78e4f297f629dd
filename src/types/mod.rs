pub mod research;

pub use research::{
    Interview, InterviewCard, Persona, PersonaCard, QaPair, ResearchMetadata, ResearchRequest,
    ResearchResult, new_session_id,
};
