pub mod interviews;
pub mod personas;
pub mod questions;
pub mod synthesis;

pub use interviews::InterviewConductor;
pub use personas::PersonaSynthesizer;
pub use questions::QuestionSynthesizer;
pub use synthesis::SynthesisEngine;
