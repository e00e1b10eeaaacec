//! daybook library
//!
//! Local-first storage core for a personal productivity suite: a media
//! gallery persisted to a durable key-value store with a text-store
//! fallback, date-keyed daily notes with debounced auto-save, and the
//! planner/message/profile stores sharing the same layout.

pub mod app;
pub mod config;
pub mod error;
pub mod journal;
pub mod media;
pub mod messages;
pub mod planner;
pub mod profile;
pub mod store;
