//! Domain library for the project-prioritization service: the WSJF scoring
//! engine, project lifecycle and HTTP surface, bulk CSV intake, weekly
//! capacity planning, and the shared config/telemetry/error plumbing.

pub mod capacity;
pub mod config;
pub mod error;
pub mod import;
pub mod projects;
pub mod reference;
pub mod scoring;
pub mod telemetry;
