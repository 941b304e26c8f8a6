// Cross-cutting prompt fragments. Feature prompts live next to the feature
// (see extraction/prompts.rs) and compose these.

/// Appended to every system prompt that expects machine-readable output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Reminder that absent information must stay absent.
pub const NO_GUESSING_INSTRUCTION: &str = "\
    If the posting does not state a value, use null (or an empty list). \
    Never infer requirements that are not written in the text.";
