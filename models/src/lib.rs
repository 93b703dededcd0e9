//! Domain models for the job board client.
//!
//! This crate contains the DTOs mirrored from the job board API. Models carry
//! no network or state logic; the only behaviour here is field defaulting,
//! status inference and value validation.
//!
//! ## Architecture
//!
//! - **models** (this crate): Pure data structures
//! - **jobboard-core**: API client, optimistic views, search and apply flow
//! - **jobboard**: CLI wiring everything together

pub mod application;
pub mod catalog;
pub mod company;
pub mod error;
pub mod job;
pub mod profile;
pub mod session;
pub mod skill;

#[cfg(test)]
mod tests;

pub use application::{Application, ApplicationAction, ApplicationId, ApplicationStatus};
pub use catalog::{RegionCatalogEntry, SkillCatalogEntry};
pub use common::ErrorLocation;
pub use company::{Company, CompanyDraft, CompanyId};
pub use error::model_error::ModelError;
pub use job::builder::JobDraftBuilder;
pub use job::{CompanyRef, JobDraft, JobId, JobPosting, JobStatus};
pub use profile::{ProfileUpdate, UserProfile};
pub use session::{Role, SessionIdentity, UserId};
pub use skill::{SkillAssignment, SkillId};
