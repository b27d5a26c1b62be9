// System instructions shared by Gemini callers.

/// Keeps replies machine-readable: one JSON object, nothing around it.
pub const JSON_ONLY_SYSTEM: &str = "You restructure resume text into JSON. \
    Reply with exactly one JSON object and nothing else: \
    no prose, no markdown fences, no comments. \
    Use only the section names you are given and copy resume text verbatim.";
