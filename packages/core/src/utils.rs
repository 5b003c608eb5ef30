// ABOUTME: Shared display helpers for Steamfolio
// ABOUTME: Playtime and timestamp formatting, Steam CDN image URLs

use chrono::DateTime;

const STEAM_CDN_BASE: &str = "https://cdn.cloudflare.steamstatic.com/steam/apps";

/// Format a minute count as hours with one decimal, e.g. `2.0 h`
pub fn minutes_to_hours(minutes: i64) -> String {
    let minutes = minutes.max(0);
    format!("{:.1} h", minutes as f64 / 60.0)
}

/// Format a Unix timestamp as a UTC date; zero, negative or out-of-range values render as `-`
pub fn epoch_to_date(epoch_seconds: i64) -> String {
    if epoch_seconds <= 0 {
        return "-".to_string();
    }
    match DateTime::from_timestamp(epoch_seconds, 0) {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => "-".to_string(),
    }
}

/// Header artwork for an app on the Steam CDN
pub fn header_image_url(appid: i64) -> String {
    format!("{}/{}/header.jpg", STEAM_CDN_BASE, appid)
}
