use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;

use crate::display::{library_table, profile_header, sync_summary_line};
use steamfolio_core::{LibraryEntry, Profile};
use steamfolio_portfolio::SyncSummary;

fn entry(appid: i64, name: &str, minutes: i64, last_played: i64) -> LibraryEntry {
    LibraryEntry {
        appid,
        name: name.to_string(),
        playtime_forever: minutes,
        playtime_2weeks: 0,
        rtime_last_played: last_played,
    }
}

#[test]
fn test_library_table_formats_hours_and_dates() {
    let table = library_table(&[
        entry(10, "Counter-Strike", 120, 1_700_000_000),
        entry(20, "Team Fortress Classic", 0, 0),
    ])
    .to_string();

    assert!(table.contains("Counter-Strike"));
    assert!(table.contains("2.0 h"));
    assert!(table.contains("2023-11-14"));
    assert!(table.contains("0.0 h"));
    assert!(table.contains(" - "));
}

#[test]
fn test_library_table_truncates_long_names() {
    let long_name = "A".repeat(60);
    let table = library_table(&[entry(1, &long_name, 1, 0)]).to_string();

    assert!(!table.contains(&long_name));
    assert!(table.contains('…'));
}

#[test]
fn test_profile_header_falls_back_to_steamid() {
    colored::control::set_override(false);

    let mut profile = Profile {
        id: 1,
        user_id: "alice".to_string(),
        steamid64: "76561197960287930".to_string(),
        persona: String::new(),
        avatar: String::new(),
        level: 3,
        last_synced: None,
    };
    assert_eq!(
        profile_header(&profile),
        "76561197960287930 (level 3, last synced never)"
    );

    profile.persona = "gaben".to_string();
    profile.last_synced = Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap());
    assert_eq!(
        profile_header(&profile),
        "gaben (level 3, last synced 2024-05-01 12:30 UTC)"
    );
}

#[test]
fn test_sync_summary_line() {
    assert_eq!(
        sync_summary_line(&SyncSummary {
            games_synced: 3,
            entries_skipped: 0
        }),
        "Synced 3 games"
    );
    assert_eq!(
        sync_summary_line(&SyncSummary {
            games_synced: 3,
            entries_skipped: 2
        }),
        "Synced 3 games (2 entries without an app id skipped)"
    );
}
