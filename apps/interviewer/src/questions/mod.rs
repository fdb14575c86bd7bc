// Question Generator: turns a candidate's tech stack into 3–5 interview questions.
// All LLM calls go through llm_client; this module owns the model preference
// order, response parsing and fallback padding.

pub mod generator;
pub mod parser;
pub mod prompts;

pub use generator::{is_error_marker, GenerationError, QuestionGenerator, DEFAULT_MODELS};
