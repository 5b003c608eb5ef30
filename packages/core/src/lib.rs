// ABOUTME: Core types and utilities for Steamfolio
// ABOUTME: Foundational package providing shared domain records across all Steamfolio packages

pub mod types;
pub mod utils;

// Re-export main types
pub use types::{
    Achievement, Game, LibraryEntry, PlaytimeSnapshot, Profile, UserAchievement, UserGame,
    UNKNOWN_GAME_NAME,
};

// Re-export utilities
pub use utils::{epoch_to_date, header_image_url, minutes_to_hours};
