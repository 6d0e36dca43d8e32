//! Domain entities - the core business objects.

mod category;
mod post;
mod user;

pub use category::Category;
pub use post::{Post, PublicationStatus};
pub use user::{Actor, STAFF_ROLE, User};

#[cfg(test)]
pub(crate) use post::fixtures;
