//! # Vlog Core
//!
//! The domain layer of the vlog service: entities, the post query and
//! pagination rules, authorization predicates and the use cases built on them.
//! This crate has no infrastructure dependencies; storage is reached through
//! the traits in [`ports`].

pub mod authz;
pub mod batch;
pub mod config;
pub mod domain;
pub mod error;
pub mod form;
pub mod pagination;
pub mod ports;
pub mod query;
pub mod service;
pub mod slug;
pub mod video;

pub use config::VlogConfig;
pub use error::DomainError;
pub use service::VlogService;
