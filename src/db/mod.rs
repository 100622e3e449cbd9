//! Database layer (Firebase Realtime Database over REST).

pub mod realtime;

pub use realtime::RealtimeDb;

/// Path segments as constants.
pub mod paths {
    /// Root collection of leaderboard documents
    pub const LEADERBOARDS: &str = "leaderboards";
    /// Ordered column list inside a leaderboard document
    pub const COLUMNS: &str = "columns";
    /// Submitted records inside a leaderboard document, keyed by push id
    pub const ENTRIES: &str = "entries";
    /// Child the search query orders and filters by
    pub const KEY_FIELD: &str = "key";
}
