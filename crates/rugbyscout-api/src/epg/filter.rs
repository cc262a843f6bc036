//! Rugby program filter.

use super::types::{ProgramEntry, RugbyMatch};

/// Keyword matched case-insensitively against title and description.
const KEYWORD: &str = "rugby";

/// Returns the programs whose title or description mentions rugby.
///
/// Matching is a case-insensitive substring test; an absent description
/// counts as empty. Output keeps input order.
#[must_use]
pub fn find_rugby(programs: &[ProgramEntry], channel_name: &str) -> Vec<RugbyMatch> {
    programs
        .iter()
        .filter(|p| mentions_rugby(&p.title) || p.description.as_deref().is_some_and(mentions_rugby))
        .map(|p| RugbyMatch {
            channel: String::from(channel_name),
            title: p.title.clone(),
            start: p.start.clone(),
            end: p.end.clone(),
            description: p.description.clone().unwrap_or_default(),
        })
        .collect()
}

fn mentions_rugby(text: &str) -> bool {
    text.to_lowercase().contains(KEYWORD)
}
