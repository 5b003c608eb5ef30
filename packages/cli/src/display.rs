// ABOUTME: Terminal rendering for library listings and sync results
// ABOUTME: comfy-table output with hours and last-played dates

use colored::*;
use comfy_table::{
    modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, CellAlignment, ContentArrangement, Table,
};

use steamfolio_core::{epoch_to_date, minutes_to_hours, LibraryEntry, Profile};
use steamfolio_portfolio::SyncSummary;

const MAX_NAME_WIDTH: usize = 40;

pub fn library_table(entries: &[LibraryEntry]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec!["App ID", "Name", "Total", "Last 2 Weeks", "Last Played"]);

    for entry in entries {
        table.add_row(vec![
            entry.appid.to_string(),
            truncate(&entry.name, MAX_NAME_WIDTH),
            minutes_to_hours(entry.playtime_forever),
            minutes_to_hours(entry.playtime_2weeks),
            epoch_to_date(entry.rtime_last_played),
        ]);
    }

    for column in 2..=4 {
        if let Some(col) = table.column_mut(column) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    table
}

pub fn profile_header(profile: &Profile) -> String {
    let name = if profile.persona.is_empty() {
        profile.steamid64.as_str()
    } else {
        profile.persona.as_str()
    };
    let synced = profile
        .last_synced
        .map(|ts| ts.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "never".to_string());

    format!(
        "{} (level {}, last synced {})",
        name.bold(),
        profile.level,
        synced
    )
}

pub fn sync_summary_line(summary: &SyncSummary) -> String {
    let mut line = format!("Synced {} games", summary.games_synced);
    if summary.entries_skipped > 0 {
        line.push_str(&format!(" ({} entries without an app id skipped)", summary.entries_skipped));
    }
    line
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
