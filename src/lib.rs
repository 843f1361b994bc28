//! InterestMiner - Meta ads analytics and interest mining service
//!
//! This library provides the core functionality for enriching Meta ads
//! campaign metrics, generating AI performance verdicts, and mining the
//! Graph API interest taxonomy for targeting ideas.

pub mod analysis;
pub mod api;
pub mod cli;
pub mod config;
pub mod graph;
pub mod llm;
pub mod logging;
pub mod metrics;
