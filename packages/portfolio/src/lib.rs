// ABOUTME: Portfolio services for Steamfolio
// ABOUTME: Library sync routine plus cached library, game detail and friends lookups

pub mod error;
pub mod service;
pub mod sync;

pub use error::{PortfolioError, Result, SyncError};
pub use service::{FriendOwner, GameDetail, PortfolioService, MAX_FRIENDS_CHECKED};
pub use sync::{ProfileRefresh, SyncService, SyncSummary};
