//! Greenline Engine
//!
//! The deployment pipeline state machine: five strictly sequential stages
//! take a freshly pushed release-candidate image from "available in the
//! registry" to "serving 100% of production traffic", with an operator
//! approval gate in the middle and alarm-driven automatic rollback behind it.
//!
//! Architecture:
//! - Config: environment-driven pipeline configuration
//! - Services: trait seams over the cloud gateway (credentials, artifacts,
//!   deployments, parameters, upstream inputs)
//! - Stages: Source, Build, CreateDeployment, Approval, RerouteTraffic
//! - Controller: advances a run stage by stage and emits observable events
//! - Rollback: stops the active deployment on failure, rejection, or alarm

pub mod approval;
pub mod config;
pub mod controller;
pub mod error;
pub mod poller;
pub mod rollback;
pub mod service;
pub mod stage;
pub mod store;
