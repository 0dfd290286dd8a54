//! showtrack-core - Core library for showtrack
//!
//! This crate contains the shared models, the season progress presenter and
//! the cloud account setup controller used by showtrack interfaces.

pub mod cloud;
pub mod error;
pub mod models;
pub mod seasons;
pub mod util;

pub use error::{Error, Result};
pub use models::{AccountState, AuthUser, Season, SeasonId, SeasonListItem, SeasonStats};
