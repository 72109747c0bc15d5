//! Fitness onboarding — account registration and fitness-profile capture client.

pub mod api;
pub mod config;
pub mod error;
pub mod navigation;
pub mod onboarding;
pub mod store;
