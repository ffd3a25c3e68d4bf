// Prompt templates for the coach. The feedback template's section labels and
// their order are load-bearing: the parser splits feedback on the Score marker.

/// Feedback prompt template. Replace `{question}` and `{answer}` before sending.
pub const FEEDBACK_PROMPT_TEMPLATE: &str = "You are an AI interview coach. Please analyze the following answer.
Question: {question}
Answer: {answer}

Provide the following in order:
1. Feedback: Provide clear, detailed feedback.
2. Suggestion: One specific improvement.
3. Category: Technical, Communication, or Both.
4. Score: X/10";

/// Sample-answer prompt template. Replace `{question}` before sending.
pub const AUTO_ANSWER_PROMPT_TEMPLATE: &str =
    "Generate a strong sample interview answer for this question:\n{question}";

/// Embeds the question and answer verbatim. Does not validate; callers do.
pub fn build_feedback_prompt(question: &str, answer: &str) -> String {
    // Single pass so an answer containing "{question}" is not re-substituted.
    FEEDBACK_PROMPT_TEMPLATE
        .split_once("{question}")
        .and_then(|(head, rest)| {
            rest.split_once("{answer}")
                .map(|(middle, tail)| format!("{head}{question}{middle}{answer}{tail}"))
        })
        .unwrap_or_else(|| FEEDBACK_PROMPT_TEMPLATE.to_string())
}

pub fn build_auto_answer_prompt(question: &str) -> String {
    AUTO_ANSWER_PROMPT_TEMPLATE.replace("{question}", question)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_prompt_exact_text() {
        let prompt = build_feedback_prompt("What is overfitting?", "When a model memorizes noise.");
        assert_eq!(
            prompt,
            "You are an AI interview coach. Please analyze the following answer.\n\
             Question: What is overfitting?\n\
             Answer: When a model memorizes noise.\n\
             \n\
             Provide the following in order:\n\
             1. Feedback: Provide clear, detailed feedback.\n\
             2. Suggestion: One specific improvement.\n\
             3. Category: Technical, Communication, or Both.\n\
             4. Score: X/10"
        );
    }

    #[test]
    fn test_feedback_prompt_sections_in_order() {
        let prompt = build_feedback_prompt("Q", "A");
        let feedback = prompt.find("1. Feedback:").unwrap();
        let suggestion = prompt.find("2. Suggestion:").unwrap();
        let category = prompt.find("3. Category:").unwrap();
        let score = prompt.find("4. Score:").unwrap();
        assert!(feedback < suggestion && suggestion < category && category < score);
    }

    #[test]
    fn test_feedback_prompt_does_not_resubstitute_placeholders() {
        let prompt = build_feedback_prompt("Explain {answer}", "I typed {question} here");
        assert!(prompt.contains("Question: Explain {answer}\n"));
        assert!(prompt.contains("Answer: I typed {question} here\n"));
    }

    #[test]
    fn test_prompts_accept_empty_input() {
        let prompt = build_feedback_prompt("", "   ");
        assert!(prompt.contains("Question: \nAnswer:    \n"));
        assert_eq!(
            build_auto_answer_prompt(""),
            "Generate a strong sample interview answer for this question:\n"
        );
    }

    #[test]
    fn test_auto_answer_prompt_embeds_question() {
        assert_eq!(
            build_auto_answer_prompt("How do you monitor model drift?"),
            "Generate a strong sample interview answer for this question:\nHow do you monitor model drift?"
        );
    }

    #[test]
    fn test_prompts_are_deterministic() {
        assert_eq!(build_feedback_prompt("Q", "A"), build_feedback_prompt("Q", "A"));
    }
}
