//! Greenline Core
//!
//! Core types and abstractions for the Greenline blue/green deployment
//! pipeline.
//!
//! This crate contains:
//! - Domain types: Core business entities (PipelineRun, StageResult,
//!   DeploymentRecord, DelegatedCredential, etc.)
//! - DTOs: Data transfer objects for HTTP surfaces and the cloud gateway

pub mod domain;
pub mod dto;
