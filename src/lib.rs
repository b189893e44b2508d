//! MASAR: a retail investment app prototype.
//!
//! Onboarding with a three-question risk questionnaire, a mock portfolio,
//! a small fund catalog, a keyword-scripted advisor and a simulated
//! investment flow. Everything lives in memory for a single session.

pub mod advisor;
pub mod app;
pub mod catalog;
pub mod channels;
pub mod config;
pub mod error;
pub mod format;
pub mod invest;
pub mod onboarding;
pub mod portfolio;
pub mod profile;
pub mod session;

pub use error::{Error, Result};
