use crate::intake::CandidateProfile;
use crate::session::AnswerRecord;

/// Prompt templates sent to the text-generation service
pub struct InterviewPrompts;

impl InterviewPrompts {
    /// Initial technical question set for a tech stack
    pub fn technical_questions(tech_stack: &str, count: usize) -> String {
        format!(
            r#"You're an expert technical interviewer. Generate {count} technical interview questions for a candidate skilled in: {stack}.

Cover the most important languages, tools and frameworks from that list, mixing fundamentals with practical problem-solving.

Respond with a numbered list only, one question per line, in the form:
1. <question>
2. <question>

Do not add headings, answers or commentary."#,
            count = count,
            stack = tech_stack.trim(),
        )
    }

    /// Additional questions that must not repeat the ones already asked
    pub fn more_questions(tech_stack: &str, existing: &[String], count: usize) -> String {
        let asked = if existing.is_empty() {
            "(none yet)".to_string()
        } else {
            numbered(existing, 1)
        };

        format!(
            r#"You're an expert technical interviewer. The candidate is skilled in: {stack}.

These questions have already been asked:
{asked}

Generate {count} additional technical interview questions for this candidate. Do not repeat or rephrase any question listed above.

Respond with a numbered list only, one question per line, in the form:
1. <question>
2. <question>"#,
            stack = tech_stack.trim(),
            asked = asked,
            count = count,
        )
    }

    /// Evaluative summary of the candidate's answers
    pub fn feedback(profile: &CandidateProfile, answers: &[AnswerRecord]) -> String {
        let candidate = profile
            .iter()
            .map(|(key, value)| format!("- {}: {}", key.label(), value))
            .collect::<Vec<_>>()
            .join("\n");

        let transcript = if answers.is_empty() {
            "No technical questions were answered.".to_string()
        } else {
            answers
                .iter()
                .enumerate()
                .map(|(i, record)| {
                    format!(
                        "Q{n}: {question}\nA{n}: {answer}",
                        n = i + 1,
                        question = record.question,
                        answer = record.answer
                    )
                })
                .collect::<Vec<_>>()
                .join("\n\n")
        };

        format!(
            r#"You're an expert technical interviewer writing an evaluation of a screening interview.

## Candidate
{candidate}

## Technical Questions and Answers
{transcript}

---

Write a concise evaluation addressed to the hiring team with these sections:

**Strengths**: what the answers show the candidate does well.
**Weaknesses**: gaps, mistakes or vague answers.
**Suitability**: how well the candidate fits the desired position, with a one-line recommendation.

Base the evaluation only on the answers above."#,
            candidate = candidate,
            transcript = transcript,
        )
    }
}

/// Render items as a numbered list starting at `first`
pub(crate) fn numbered(items: &[String], first: usize) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", first + i, item))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::FieldKey;

    #[test]
    fn test_numbered_offsets() {
        let items = vec!["A?".to_string(), "B?".to_string()];
        assert_eq!(numbered(&items, 1), "1. A?\n2. B?");
        assert_eq!(numbered(&items, 4), "4. A?\n5. B?");
    }

    #[test]
    fn test_technical_questions_prompt() {
        let prompt = InterviewPrompts::technical_questions("  Rust, Tokio, Postgres ", 5);
        assert!(prompt.contains("Generate 5 technical interview questions"));
        assert!(prompt.contains("skilled in: Rust, Tokio, Postgres."));
        assert!(prompt.contains("numbered list"));
    }

    #[test]
    fn test_more_questions_lists_existing() {
        let existing = vec![
            "What is a closure?".to_string(),
            "Explain pointers.".to_string(),
        ];
        let prompt = InterviewPrompts::more_questions("C++", &existing, 3);

        assert!(prompt.contains("1. What is a closure?\n2. Explain pointers."));
        assert!(prompt.contains("Generate 3 additional"));
        assert!(prompt.contains("Do not repeat"));
    }

    #[test]
    fn test_feedback_prompt_embeds_answers() {
        let mut profile = CandidateProfile::new();
        profile.insert(FieldKey::FullName, "Ada Lovelace".to_string());
        profile.insert(FieldKey::DesiredPosition, "Backend Engineer".to_string());

        let answers = vec![AnswerRecord {
            question: "What is ownership?".to_string(),
            answer: "Each value has one owner".to_string(),
        }];
        let prompt = InterviewPrompts::feedback(&profile, &answers);

        assert!(prompt.contains("- Full Name: Ada Lovelace"));
        assert!(prompt.contains("- Desired Position: Backend Engineer"));
        assert!(prompt.contains("Q1: What is ownership?\nA1: Each value has one owner"));
        assert!(prompt.contains("**Strengths**"));
        assert!(prompt.contains("**Suitability**"));
    }

    #[test]
    fn test_feedback_prompt_without_answers() {
        let prompt = InterviewPrompts::feedback(&CandidateProfile::new(), &[]);
        assert!(prompt.contains("No technical questions were answered."));
    }
}
