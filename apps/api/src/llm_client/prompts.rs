// Cross-cutting prompt fragments. Each module that delegates to the model
// keeps its own prompts.rs next to it and appends these where needed.

/// Appended to every system prompt that expects structured output.
pub const JSON_ONLY_SYSTEM_SUFFIX: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";
