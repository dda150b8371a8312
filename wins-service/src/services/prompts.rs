//! Instruction templates for the two endpoints.

use super::providers::{ChatMessage, ChatRequest, ResponseFormat};
use crate::dtos::values::{display_text, is_truthy};
use crate::dtos::{CheckInInput, DraftRequest};
use serde_json::Value;

pub const ANALYZE_TEMPERATURE: f32 = 0.3;
pub const DRAFT_TEMPERATURE: f32 = 0.5;

/// Stand-in for optional draft fields the caller left out.
pub const NOT_PROVIDED: &str = "(not provided)";

const ANALYZE_SYSTEM_PROMPT: &str = "You are a coaching assistant for an internal L&D leader (\"Josh\") at a large organization.\n\
    Your job: detect concrete wins, capture evidence, and suggest simple celebration actions.\n\
    Be practical, concise, and human. Do NOT invent facts. Use only the user's input.\n\
    Return STRICT JSON only that matches the schema requested.";

const ANALYZE_TASK: &str = "TASK:\n\
    1) Write a 1-2 sentence summary.\n\
    2) Extract 1 to 3 wins. Each win must have:\n\
    - id (short string)\n\
    - title (max 10 words)\n\
    - story (1-2 sentences)\n\
    - evidence (1 sentence, based on input)\n\
    - celebrationIdeas (2-4 bullet items as strings; specific actions)";

const DRAFT_SYSTEM_PROMPT: &str = "You write celebration drafts for an L&D leader.\n\
    Rules:\n\
    - Use the details provided; do not add names, metrics, or claims not present.\n\
    - Keep it ready-to-send.\n\
    - Match the requested channel and tone.\n\
    Return ONLY the draft text (no markdown fences).";

/// Build the check-in analysis request: strict JSON output at low temperature.
pub fn analyze_request(model: &str, input: &CheckInInput) -> serde_json::Result<ChatRequest> {
    let input_json = serde_json::to_string_pretty(input)?;
    let user = format!("Weekly check-in input (JSON):\n{input_json}\n\n{ANALYZE_TASK}");

    Ok(ChatRequest::new(
        model,
        vec![
            ChatMessage::system(ANALYZE_SYSTEM_PROMPT),
            ChatMessage::user(user),
        ],
    )
    .with_temperature(ANALYZE_TEMPERATURE)
    .with_response_format(ResponseFormat::JsonObject))
}

/// Build the draft request. Expects the win to be validated already.
pub fn draft_request(model: &str, request: &DraftRequest) -> ChatRequest {
    let win = request.win.clone().unwrap_or_default();

    let user = format!(
        "CHANNEL: {channel}\n\
         TONE: {tone}\n\
         OUTCOME: {outcome}\n\
         RECOGNIZE: {recognize}\n\
         \n\
         WIN:\n\
         Title: {title}\n\
         Story: {story}\n\
         Evidence: {evidence}\n\
         \n\
         Write the draft now.",
        channel = or_not_provided(request.channel.as_ref()),
        tone = or_not_provided(request.tone.as_ref()),
        outcome = or_not_provided(request.outcome.as_ref()),
        recognize = or_not_provided(request.recognize_who.as_ref()),
        title = text_or_empty(win.title.as_ref()),
        story = text_or_empty(win.story.as_ref()),
        evidence = text_or_empty(win.evidence.as_ref()),
    );

    ChatRequest::new(
        model,
        vec![
            ChatMessage::system(DRAFT_SYSTEM_PROMPT),
            ChatMessage::user(user),
        ],
    )
    .with_temperature(DRAFT_TEMPERATURE)
}

fn or_not_provided(value: Option<&Value>) -> String {
    match value {
        Some(v) if is_truthy(v) => display_text(v),
        _ => NOT_PROVIDED.to_string(),
    }
}

fn text_or_empty(value: Option<&Value>) -> String {
    match value {
        Some(v) if is_truthy(v) => display_text(v),
        _ => String::new(),
    }
}
