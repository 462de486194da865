// Shared prompt constants.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment asking for plain prose or markdown, no preamble.
pub const PLAIN_TEXT_SYSTEM: &str = "You are a careful meeting assistant. \
    Respond with the requested text only. \
    Do NOT add a preamble such as 'Here is the summary'. \
    Do NOT invent facts that are not present in the source material.";
