/// Maximum prompt length accepted by the prompt-mode proxy, in characters
pub const MAX_PROMPT_CHARS: usize = 10_000;

/// Maximum prompt length accepted by the image proxy, in characters
pub const MAX_IMAGE_PROMPT_CHARS: usize = 1_000;

/// Sanitizes a user prompt before it is forwarded upstream.
/// Control characters other than newlines and tabs are removed and the
/// result is trimmed. Returns an error message if the prompt is too long.
pub fn sanitize_user_prompt(prompt: &str, max_chars: usize) -> Result<String, String> {
    let sanitized = prompt
        .chars()
        .filter(|&c| c == '\n' || c == '\t' || !c.is_control())
        .collect::<String>();
    let sanitized = sanitized.trim();

    if sanitized.chars().count() > max_chars {
        return Err(format!(
            "Prompt exceeds maximum length of {} characters",
            max_chars
        ));
    }

    Ok(sanitized.to_string())
}

/// Joins the system instruction and the user text into the single prompt
/// sent to the text model.
pub fn compose_prompt(system_instruction: &str, user_prompt: &str) -> String {
    format!("{system_instruction}\n\nUser: {user_prompt}")
}
