//! Policybot - Telegram Car Insurance Sales Bot
//!
//! This crate implements a guided document-submission workflow over Telegram:
//! collect passport and vehicle ID photos, extract structured fields via OCR,
//! confirm the extractions with the user, and deliver a generated PDF policy.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
