pub mod cloud;
pub mod config;
pub mod seasons;
