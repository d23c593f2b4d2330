//! Core domain types
//!
//! This module contains the core domain structures used across Greenline
//! services. These types represent the fundamental business entities and are
//! shared between the engine (for execution) and the server (for inspection).

pub mod approval;
pub mod artifact;
pub mod credential;
pub mod deployment;
pub mod run;
pub mod stage;
