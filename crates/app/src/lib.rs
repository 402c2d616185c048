//! Applica application layer.
//!
//! Wires the session store, mission progress, feed loader and audit sink
//! into one [`App`] that exposes the view actions (start onboarding, submit
//! the purpose test, complete a mission, like a post) and drives the
//! [`Navigator`]. The `applica` binary is a thin command-line front end over
//! it.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod navigator;
pub mod profile;

pub use app::{App, MissionCard};
pub use config::AppConfig;
pub use error::{ActionError, ConfigError};
pub use navigator::Navigator;
pub use profile::ProfileView;
