// src/ats/mod.rs
//! Applicant-tracking provider integration

pub mod client;
pub mod types;

pub use client::AtsClient;
