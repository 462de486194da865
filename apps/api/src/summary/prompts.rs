// Summary LLM prompt templates.
// All prompts for the summary module are defined here.

pub const SUMMARY_PROMPT: &str = "Summarize the following transcript based on the prompt provided.

Transcript: {transcript}

Prompt: {prompt}";

