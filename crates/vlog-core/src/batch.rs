//! Back-office bulk actions over a set of posts.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A bulk mutation applied to every selected post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchAction {
    /// Set `views_count` back to zero.
    ResetViews,
    /// Set `published_date` to the current time.
    Publish,
    /// Hard-delete the posts.
    Delete,
}

impl BatchAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchAction::ResetViews => "reset_views",
            BatchAction::Publish => "publish",
            BatchAction::Delete => "delete",
        }
    }

    /// Confirmation message shown after the action ran.
    pub fn summary(&self, affected: u64) -> String {
        match self {
            BatchAction::ResetViews => format!("{affected} vlog(s) had their view count reset."),
            BatchAction::Publish => format!("{affected} vlog(s) published."),
            BatchAction::Delete => format!("{affected} vlog(s) successfully deleted."),
        }
    }
}

impl fmt::Display for BatchAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BatchAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reset_views" => Ok(BatchAction::ResetViews),
            "publish" => Ok(BatchAction::Publish),
            "delete" => Ok(BatchAction::Delete),
            other => Err(DomainError::Validation(format!(
                "Unknown action '{other}': expected reset_views, publish or delete"
            ))),
        }
    }
}

/// Validate a selection of ids: non-empty, no duplicates, at most `max`.
pub fn validate_ids(ids: &[i64], max: usize) -> Result<(), DomainError> {
    if ids.is_empty() {
        return Err(DomainError::Validation(
            "Select at least one vlog".to_string(),
        ));
    }
    if ids.len() > max {
        return Err(DomainError::Validation(format!(
            "Too many vlogs selected: max {max}"
        )));
    }
    let mut seen = HashSet::new();
    for &id in ids {
        if !seen.insert(id) {
            return Err(DomainError::Validation(format!("Duplicate vlog ID: {id}")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip_names() {
        for action in [
            BatchAction::ResetViews,
            BatchAction::Publish,
            BatchAction::Delete,
        ] {
            assert_eq!(action.as_str().parse::<BatchAction>().unwrap(), action);
        }
        assert!("archive".parse::<BatchAction>().is_err());
    }

    #[test]
    fn test_validate_ids() {
        assert!(validate_ids(&[1, 2, 3], 10).is_ok());
        assert!(validate_ids(&[], 10).is_err());
        assert!(validate_ids(&[1, 1], 10).is_err());
        assert!(validate_ids(&[1, 2, 3], 2).is_err());
    }

    #[test]
    fn test_summary() {
        assert_eq!(BatchAction::Publish.summary(2), "2 vlog(s) published.");
    }
}
