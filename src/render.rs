//! Plain-text rendering of the sign-up page.

use crate::config::EventInfo;
use crate::page::PageState;
use crate::registration::Registration;
use crate::roster::MAX_PER_TEAM;

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

pub const OPEN_SLOT: &str = "Open slot";
pub const NO_SUBSTITUTES: &str = "Nobody yet.";
pub const LOADING: &str = "Loading…";

/// Render header, counts, team sections, substitutes and the status line.
#[must_use]
pub fn render_page(event: &EventInfo, state: &PageState) -> String {
    let counts = state.roster.counts();
    let mut lines = vec![
        format!("🏒 {}", event.title),
        event.subtitle.clone(),
        format!("⚪ White: {}/{MAX_PER_TEAM}   ⚫ Black: {}/{MAX_PER_TEAM}", counts.white, counts.black),
    ];

    if let Some(message) = &state.message {
        lines.push(String::new());
        lines.push(message.clone());
    }
    if state.loading {
        lines.push(LOADING.to_owned());
    }

    team_lines(&mut lines, "⚪ White team", &state.roster.white);
    team_lines(&mut lines, "⚫ Black team", &state.roster.black);

    lines.push(String::new());
    lines.push("❄️ Substitutes".to_owned());
    if state.roster.subs.is_empty() {
        lines.push(format!("  {NO_SUBSTITUTES}"));
    } else {
        lines.extend(
            state.roster.subs.iter().enumerate().map(|(idx, sub)| {
                format!("  {}. {} ({})", idx + 1, sub.short_name(), sub.team.label())
            }),
        );
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn team_lines(lines: &mut Vec<String>, heading: &str, seated: &[Registration]) {
    lines.push(String::new());
    lines.push(heading.to_owned());
    lines.extend((0..MAX_PER_TEAM).map(|slot| match seated.get(slot) {
        Some(player) => format!("  {}. {}", slot + 1, player.short_name()),
        None => format!("  {}. {OPEN_SLOT}", slot + 1),
    }));
}
