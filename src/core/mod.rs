//! Core logic - framework-agnostic ghost ping detection and notification.

/// Deleted message snapshots and the ghost ping eligibility check
pub mod ghost_ping;
/// Notification composition, reply-context enrichment, and the Discord gateway seam
pub mod notification;
/// Bounded store of recent message state
pub mod tracker;
