//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate load/save and rendering into user-action level APIs.
//! - Keep CLI/FFI front ends decoupled from storage details.

pub mod board_service;
pub mod events;
