//! # proctor-core
//!
//! Core types and suspicious-activity classification for Proctor.
//!
//! This crate provides the foundational types shared across all Proctor crates:
//! - Entity structs for detections, suspicious findings, alerts and session records
//! - The dual session identifier (backend-native or fallback numeric) and its parser
//! - The suspicious-activity classifier and the detection-source boundary
//! - Input validation for session records
//! - Response types returned across the repository boundary

pub mod classifier;
pub mod detector;
pub mod entities;
pub mod enums;
pub mod ids;
pub mod responses;
pub mod validation;
