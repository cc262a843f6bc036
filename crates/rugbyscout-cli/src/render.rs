//! Console report rendering.
//!
//! Each renderer returns the report as lines; the caller decides where
//! they go.

use rugbyscout_api::calendar::CalendarEvent;
use rugbyscout_api::epg::RugbyMatch;

/// Horizontal rule printed before a report total.
fn separator() -> String {
    "─".repeat(50)
}

/// Renders the `tv` report, grouped by broadcast date.
#[must_use]
pub fn render_tv_report(matches: &[RugbyMatch]) -> Vec<String> {
    if matches.is_empty() {
        return vec![separator(), String::from("No rugby programs found.")];
    }

    let mut lines = vec![format!("🏉 Rugby on TV ({} broadcasts):", matches.len())];
    let mut current_date: Option<&str> = None;
    for m in matches {
        let date = m.start_date();
        if current_date != Some(date) {
            lines.push(String::new());
            lines.push(format!("📅 {date}"));
            current_date = Some(date);
        }
        let time = m.start_time();
        if time.is_empty() {
            lines.push(format!("   🏉 [{}] {}", m.channel, m.title));
        } else {
            lines.push(format!("   🏉 {time} [{}] {}", m.channel, m.title));
        }
    }

    lines.push(String::new());
    lines.push(separator());
    lines.push(format!("✅ Total: {} rugby broadcasts!", matches.len()));
    lines
}

/// Renders the `events` report, one heading per start date.
#[must_use]
pub fn render_events_report(events: &[CalendarEvent], days: u32) -> Vec<String> {
    let mut lines = Vec::new();

    if events.is_empty() {
        lines.push(String::from("No upcoming rugby events found."));
    } else {
        lines.push(format!("🏉 Upcoming Rugby Events ({}):", events.len()));
        let mut current_date = None;
        for event in events {
            let Some(start) = event.start else {
                continue;
            };
            let date = start.date();
            if current_date != Some(date) {
                lines.push(String::new());
                lines.push(format!("📅 {}", date.format("%A, %B %d, %Y")));
                current_date = Some(date);
            }
            match start.time() {
                Some(t) => lines.push(format!("   🏉 {} {}", t.format("%H:%M"), event.title)),
                None => lines.push(format!("   🏉 {}", event.title)),
            }
            if !event.location.is_empty() {
                lines.push(format!("      📍 {}", event.location));
            }
        }
    }

    lines.push(String::new());
    lines.push(separator());
    lines.push(format!(
        "✅ Total: {} events in next {days} days",
        events.len()
    ));
    lines
}

/// Renders the `rugbypass` placeholder notice.
#[must_use]
pub fn render_rugbypass_notice(days: u32) -> Vec<String> {
    vec![
        format!("📺 Checking RugbyPass TV (next {days} days)..."),
        String::new(),
        String::from("⚠️  RugbyPass scraper not yet implemented."),
        String::from("   Will check: https://rugbypass.tv/home"),
        String::new(),
        String::from("Planned features:"),
        String::from("  - Live match availability"),
        String::from("  - Upcoming broadcasts"),
        String::from("  - Region availability check"),
    ]
}
