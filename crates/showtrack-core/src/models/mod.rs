//! Data models for showtrack

mod account;
mod season;

pub use account::{AccountState, AuthUser};
pub use season::{Season, SeasonId, SeasonListItem, SeasonStats};
