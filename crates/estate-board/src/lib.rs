//! Core library for the estate-board marketplace.
//!
//! The [`marketplace`] module tree holds the domain records, repository
//! traits, and services; [`config`], [`telemetry`], and [`error`] carry the
//! runtime scaffolding shared with the API service.

pub mod config;
pub mod error;
pub mod marketplace;
pub mod telemetry;
