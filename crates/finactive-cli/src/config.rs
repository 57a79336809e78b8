use finactive_core::ScoringPolicy;
use tracing::debug;

use crate::input;

/// Policy switches given on the command line. They only ever switch a rule on,
/// so a file-level `true` is never silently undone.
#[derive(Debug, Clone, Default)]
pub struct PolicyOverrides {
    pub strict: bool,
    pub clamp_budgeting: bool,
}

/// Build the scoring policy from an optional YAML/JSON file plus flags.
pub fn load_policy(
    path: Option<&str>,
    overrides: &PolicyOverrides,
) -> Result<ScoringPolicy, Box<dyn std::error::Error>> {
    let mut policy: ScoringPolicy = match path {
        Some(p) => input::file::read_config(p)?,
        None => ScoringPolicy::default(),
    };
    policy.strict_amounts |= overrides.strict;
    policy.clamp_budgeting_score |= overrides.clamp_budgeting;
    policy.validate()?;
    debug!(?policy, "scoring policy loaded");
    Ok(policy)
}
