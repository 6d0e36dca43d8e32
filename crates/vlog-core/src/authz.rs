//! Per-request authorization predicates.

use std::fmt;

use crate::domain::{Actor, Post};
use crate::error::DomainError;

/// A mutation guarded by the author-only rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Edit,
    Delete,
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mutation::Edit => f.write_str("edit"),
            Mutation::Delete => f.write_str("delete"),
        }
    }
}

/// Creating content needs nothing more than a known identity.
pub fn require_authenticated(actor: Option<&Actor>) -> Result<&Actor, DomainError> {
    actor.ok_or(DomainError::Unauthenticated)
}

pub fn is_author(actor: &Actor, post: &Post) -> bool {
    actor.user_id == post.author_id
}

/// Only the author of a post may edit or delete it.
pub fn ensure_author(actor: &Actor, post: &Post, mutation: Mutation) -> Result<(), DomainError> {
    if is_author(actor, post) {
        return Ok(());
    }

    tracing::warn!(
        user_id = %actor.user_id,
        post_id = post.id,
        %mutation,
        "Rejected mutation by non-author"
    );
    Err(DomainError::Forbidden)
}

/// Back-office operations are restricted to staff accounts.
pub fn ensure_staff(actor: &Actor) -> Result<(), DomainError> {
    if actor.is_staff {
        Ok(())
    } else {
        tracing::warn!(user_id = %actor.user_id, "Rejected back-office access");
        Err(DomainError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::post;
    use uuid::Uuid;

    #[test]
    fn test_author_may_mutate() {
        let author = Actor::user(Uuid::new_v4());
        let mut vlog = post(1, "Mine", None, 0);
        vlog.author_id = author.user_id;

        assert!(ensure_author(&author, &vlog, Mutation::Edit).is_ok());
        assert!(ensure_author(&author, &vlog, Mutation::Delete).is_ok());
    }

    #[test]
    fn test_other_users_are_forbidden_even_staff() {
        let vlog = post(1, "Someone else's", None, 0);
        let stranger = Actor::user(Uuid::new_v4());
        let staff = Actor::staff(Uuid::new_v4());

        assert!(matches!(
            ensure_author(&stranger, &vlog, Mutation::Edit),
            Err(DomainError::Forbidden)
        ));
        assert!(matches!(
            ensure_author(&staff, &vlog, Mutation::Delete),
            Err(DomainError::Forbidden)
        ));
    }

    #[test]
    fn test_require_authenticated() {
        assert!(matches!(
            require_authenticated(None),
            Err(DomainError::Unauthenticated)
        ));
        let actor = Actor::user(Uuid::new_v4());
        assert_eq!(require_authenticated(Some(&actor)).unwrap(), &actor);
    }

    #[test]
    fn test_ensure_staff() {
        assert!(ensure_staff(&Actor::staff(Uuid::new_v4())).is_ok());
        assert!(ensure_staff(&Actor::user(Uuid::new_v4())).is_err());
    }
}
