//! SeaORM entities for the vlog schema.

pub mod category;
pub mod post;
pub mod user;
