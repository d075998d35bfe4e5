//! Prompt construction for the editor.

use crate::types::{ChatMessage, Result};
use chrono::NaiveDate;

/// System directive sent with every planning request.
pub const RESEARCH_DIRECTOR: &str = "You are a research director. Your goal is to oversee the research project from inception to completion.";

/// Date as shown in prompts, e.g. `10/19/2026`.
pub fn prompt_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// User instruction asking for an outline of at most `max_sections` headers.
pub fn outline_instruction(date: NaiveDate, summary: &str, max_sections: usize) -> String {
    format!(
        r#"Today's date is {date}.
Research summary report: '{summary}'

Your task is to generate an outline of sections headers for the research project based on the research summary report above.
You must generate a maximum of {max} section headers.
You must focus ONLY on related research topics for subheaders and do NOT include introduction, conclusion and references.
You must return nothing but a JSON with the fields 'title' (str) and 'sections' (maximum {max} section headers) with the following structure: '{{title: string research title, date: today's date, sections: ['section header 1', 'section header 2', 'section header 3' ...]}}'."#,
        date = prompt_date(date),
        summary = summary,
        max = max_sections,
    )
}

/// The two-message planning prompt: system directive plus user instruction.
pub fn planning_prompt(date: NaiveDate, summary: &str, max_sections: usize) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(RESEARCH_DIRECTOR),
        ChatMessage::user(outline_instruction(date, summary, max_sections)),
    ]
}

/// Wrap a prompt as the single `human` message submitted to a run; the
/// prompt is carried as its JSON serialization.
pub fn as_run_messages(prompt: &[ChatMessage]) -> Result<Vec<ChatMessage>> {
    Ok(vec![ChatMessage::human(serde_json::to_string(prompt)?)])
}

/// Run messages for one section research request.
pub fn research_messages(
    query: &str,
    report_type: &str,
    parent_query: &str,
) -> Result<Vec<ChatMessage>> {
    let request = serde_json::json!({
        "query": query,
        "report_type": report_type,
        "parent_query": parent_query,
    });
    Ok(vec![ChatMessage::human(serde_json::to_string(&request)?)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MessageRole;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 7).unwrap()
    }

    #[test]
    fn test_prompt_date_format() {
        assert_eq!(prompt_date(date()), "3/7/2026");
    }

    #[test]
    fn test_instruction_embeds_inputs() {
        let text = outline_instruction(date(), "quantum summary", 3);
        assert!(text.starts_with("Today's date is 3/7/2026."));
        assert!(text.contains("Research summary report: 'quantum summary'"));
        assert!(text.contains("a maximum of 3 section headers"));
        assert!(text.contains("(maximum 3 section headers)"));
        assert!(text.contains("{title: string research title"));
        assert!(text.contains("do NOT include introduction, conclusion and references"));
    }

    #[test]
    fn test_planning_prompt_roles() {
        let prompt = planning_prompt(date(), "", 5);
        assert_eq!(prompt.len(), 2);
        assert_eq!(prompt[0].role, MessageRole::System);
        assert_eq!(prompt[0].content, RESEARCH_DIRECTOR);
        assert_eq!(prompt[1].role, MessageRole::User);
        assert!(prompt[1].content.contains("Research summary report: ''"));
    }

    #[test]
    fn test_run_messages_serialize_prompt() {
        let prompt = planning_prompt(date(), "s", 2);
        let messages = as_run_messages(&prompt).unwrap();

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, MessageRole::Human);
        let decoded: Vec<ChatMessage> = serde_json::from_str(&messages[0].content).unwrap();
        assert_eq!(decoded, prompt);
    }

    #[test]
    fn test_research_messages_carry_request() {
        let messages = research_messages("Section A", "research_report", "Title").unwrap();
        let body: serde_json::Value = serde_json::from_str(&messages[0].content).unwrap();
        assert_eq!(body["query"], "Section A");
        assert_eq!(body["report_type"], "research_report");
        assert_eq!(body["parent_query"], "Title");
    }
}
