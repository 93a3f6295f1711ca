//! Goal catalog: the fixed set of refinement styles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A named refinement style. Determines which clause is appended to the
/// system instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RefinementGoal {
    #[default]
    General,
    Technical,
    Creative,
    Concise,
    Coding,
    Structured,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown refinement goal: '{0}'. Expected one of: general, technical, creative, concise, coding, structured")]
pub struct UnknownGoal(pub String);

impl RefinementGoal {
    /// Every goal, in display order.
    pub const ALL: [RefinementGoal; 6] = [
        RefinementGoal::General,
        RefinementGoal::Technical,
        RefinementGoal::Creative,
        RefinementGoal::Concise,
        RefinementGoal::Coding,
        RefinementGoal::Structured,
    ];

    /// Stable identifier, also the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            RefinementGoal::General => "General",
            RefinementGoal::Technical => "Technical",
            RefinementGoal::Creative => "Creative",
            RefinementGoal::Concise => "Concise",
            RefinementGoal::Coding => "Coding",
            RefinementGoal::Structured => "Structured",
        }
    }

    /// Short description for pickers.
    pub fn description(self) -> &'static str {
        match self {
            RefinementGoal::General => "Balanced improvements to clarity and detail",
            RefinementGoal::Technical => "Precise terminology and exact requirements",
            RefinementGoal::Creative => "Vivid, open-ended direction for creative work",
            RefinementGoal::Concise => "Shortest prompt that keeps the intent",
            RefinementGoal::Coding => "Languages, constraints, and code expectations",
            RefinementGoal::Structured => "Sectioned prompt with explicit output format",
        }
    }
}

impl fmt::Display for RefinementGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RefinementGoal {
    type Err = UnknownGoal;

    /// Case-insensitive match on the goal name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|goal| goal.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownGoal(s.to_string()))
    }
}
