use serde::Serialize;
use tracing::info;

use crate::error::CommandError;
use crate::refine::RefinementGoal;
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoalInfo {
    pub id: &'static str,
    pub description: &'static str,
}

/// The goal catalog, in display order.
pub fn list_goals() -> Vec<GoalInfo> {
    RefinementGoal::ALL
        .into_iter()
        .map(|goal| GoalInfo {
            id: goal.as_str(),
            description: goal.description(),
        })
        .collect()
}

pub fn get_preference(state: &AppState, key: &str) -> Result<Option<String>, CommandError> {
    info!("Getting preference: {}", key);
    Ok(state.preferences().get(key)?)
}

pub fn set_preference(state: &AppState, key: &str, value: &str) -> Result<(), CommandError> {
    info!("Setting preference: {} = {}", key, value);
    Ok(state.preferences().set(key, value)?)
}

pub fn get_preferred_goal(state: &AppState) -> Result<RefinementGoal, CommandError> {
    Ok(state.preferred_goal()?)
}

pub fn set_preferred_goal(state: &AppState, goal: RefinementGoal) -> Result<(), CommandError> {
    Ok(state.set_preferred_goal(goal)?)
}
