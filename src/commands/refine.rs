use tracing::{info, warn};

use crate::error::CommandError;
use crate::history::HistoryEntry;
use crate::refine::RefinementGoal;
use crate::state::AppState;

/// Refine `prompt` and record the result in history.
///
/// `goal` and `model` fall back to the stored preferences. On success the new
/// history entry is returned and the goal becomes the preferred goal; on
/// failure history is left untouched. Once the entry is recorded, a failure
/// to store the goal preference is logged and does not fail the command.
pub async fn refine_prompt(
    state: &AppState,
    prompt: &str,
    goal: Option<RefinementGoal>,
    model: Option<&str>,
) -> Result<HistoryEntry, CommandError> {
    if prompt.trim().is_empty() {
        return Err(CommandError::InvalidInput(
            "Please enter a prompt to refine".to_string(),
        ));
    }

    let goal = match goal {
        Some(goal) => goal,
        None => state.preferred_goal()?,
    };
    let model = match model {
        Some(model) => model.to_string(),
        None => state.preferred_model()?,
    };
    let credential = state.credential().load()?;

    let refined = state
        .client()
        .refine(prompt, goal, &model, &credential)
        .await?;

    let entry = HistoryEntry::new(prompt, refined, goal);
    state.record_history(entry.clone())?;
    if let Err(e) = state.set_preferred_goal(goal) {
        warn!("Failed to remember goal '{}': {}", goal, e);
    }

    info!("Recorded refinement {} ({})", entry.id, goal);
    Ok(entry)
}
