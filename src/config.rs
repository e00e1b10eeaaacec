//! Application configuration constants
//!
//! Central location for resource limits and the fixed logical keys used
//! by the persisted-state layout.

// ===== Media Ingestion Limits =====

/// Maximum size of a single media file accepted for ingestion (5 MiB).
/// Files are stored as base64 data URLs (~33% inflation), so the ceiling
/// bounds both storage growth and serialization cost.
pub const MAX_MEDIA_FILE_BYTES: u64 = 5 * 1024 * 1024;

// ===== Secondary Store Limits =====

/// Total serialized size the secondary text store will hold (5 MiB).
/// Mirrors the quota of a browser localStorage-class store.
pub const TEXT_STORE_QUOTA_BYTES: usize = 5 * 1024 * 1024;

// ===== Auto-Save Limits =====

/// Default debounce delay before an edited note is saved, in milliseconds.
pub const AUTO_SAVE_DELAY_MS: u64 = 1000;

/// Minimum auto-save delay in milliseconds.
/// Values below this cause excessive disk I/O and degrade performance.
pub const MIN_AUTO_SAVE_DELAY_MS: u64 = 100;

/// Maximum auto-save delay in milliseconds (5 minutes).
/// Values above this risk data loss on unexpected shutdown.
pub const MAX_AUTO_SAVE_DELAY_MS: u64 = 300_000;

// ===== Persisted-State Layout =====

/// Collection name for media items in the primary key-value store.
pub const MEDIA_COLLECTION: &str = "media";

/// Fixed key holding the serialized media collection in fallback mode.
pub const MEDIA_FALLBACK_KEY: &str = "media.fallback";

/// Fixed key holding the full journal map (date key -> daily note).
pub const JOURNAL_KEY: &str = "journal.days";

/// Per-date key prefix for planner day text.
pub const PLANNER_DAY_PREFIX: &str = "planner.day.";

/// Fixed key holding the serialized message thread list.
pub const MESSAGES_KEY: &str = "messages.threads";

/// Fixed key naming the signed-in user.
pub const CURRENT_USER_KEY: &str = "session.current_user";

/// Fixed key holding the serialized user list.
pub const USERS_KEY: &str = "session.users";
