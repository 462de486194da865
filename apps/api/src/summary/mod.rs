// Summarize: transcript + instruction in, one LLM completion out.
// All LLM calls go through llm_client.

pub mod handlers;
pub mod prompts;
pub mod summarizer;
pub mod validation;
