//! System instruction for prompt refinement.

use super::goals::RefinementGoal;

const BASE_INSTRUCTION: &str = r#"You are an expert prompt engineer. Your task is to take a user's rough prompt and rewrite it into a clear, effective instruction for a large language model. Apply these principles:

1. Clarity: remove ambiguity and state the task directly.
2. Contextual depth: add the background, audience, and constraints the model needs to do the task well.
3. Formatting: organise the prompt so it is easy to follow, using sections or lists where they help.
4. Persona assignment: where useful, assign the model a relevant expert role.
5. Negative constraints: state what the model should avoid, not only what it should do."#;

const CLOSING_DIRECTIVE: &str = "Return ONLY the refined prompt text. Do not include explanations, preambles, headings about the refinement, or any other meta-commentary.";

/// Goal-specific clause. Every goal has an entry.
pub fn goal_clause(goal: RefinementGoal) -> &'static str {
    match goal {
        RefinementGoal::General => {
            "Goal: general improvement. Balance clarity and detail so the prompt works well for a wide range of models and tasks."
        }
        RefinementGoal::Technical => {
            "Goal: technical precision. Use exact domain terminology, spell out requirements and edge cases, and ask for accurate, verifiable output."
        }
        RefinementGoal::Creative => {
            "Goal: creative exploration. Encourage vivid, original output, describe tone, style, and mood, and leave room for imaginative interpretation."
        }
        RefinementGoal::Concise => {
            "Goal: conciseness. Produce the shortest prompt that fully preserves the user's intent; cut filler and redundancy."
        }
        RefinementGoal::Coding => {
            "Goal: coding assistance. Specify the programming language, runtime and library constraints, expected inputs and outputs, error handling, and code style."
        }
        RefinementGoal::Structured => {
            "Goal: structured output. Organise the prompt into labelled sections (role, context, task, constraints, output format) and define the exact format of the response."
        }
    }
}

/// Build the system instruction for `goal`: base paragraph, goal clause,
/// closing directive.
pub fn build_instruction(goal: RefinementGoal) -> String {
    format!(
        "{base}\n\n{clause}\n\n{closing}",
        base = BASE_INSTRUCTION,
        clause = goal_clause(goal),
        closing = CLOSING_DIRECTIVE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_goal_has_its_clause() {
        for goal in RefinementGoal::ALL {
            let instruction = build_instruction(goal);
            assert!(!instruction.is_empty());
            assert!(
                instruction.contains(goal_clause(goal)),
                "Instruction for {} is missing its clause",
                goal
            );
        }
    }

    #[test]
    fn test_clauses_are_distinct() {
        for a in RefinementGoal::ALL {
            for b in RefinementGoal::ALL {
                if a != b {
                    assert_ne!(goal_clause(a), goal_clause(b));
                    assert!(!build_instruction(a).contains(goal_clause(b)));
                }
            }
        }
    }

    #[test]
    fn test_base_principles_present() {
        let instruction = build_instruction(RefinementGoal::General);
        assert!(instruction.starts_with("You are an expert prompt engineer"));
        for principle in [
            "Clarity",
            "Contextual depth",
            "Formatting",
            "Persona assignment",
            "Negative constraints",
        ] {
            assert!(instruction.contains(principle), "Missing principle: {}", principle);
        }
    }

    #[test]
    fn test_ends_with_closing_directive() {
        for goal in RefinementGoal::ALL {
            assert!(build_instruction(goal).ends_with(CLOSING_DIRECTIVE));
        }
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(
            build_instruction(RefinementGoal::Coding),
            build_instruction(RefinementGoal::Coding)
        );
    }
}
