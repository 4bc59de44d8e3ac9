use super::*;
use crate::registration::Team;
use crate::roster::partition;
use crate::store::fake::rows;

fn loaded(teams: &[Team]) -> PageState {
    let mut state = PageState::default();
    state.apply_fetch(Ok(rows(teams)));
    state
}

#[test]
fn empty_roster_shows_open_slots_and_no_substitutes() {
    let out = render_page(&EventInfo::default(), &loaded(&[]));
    assert!(out.starts_with("🏒 HokejPWG\nPWG Arena • Sunday 10:45 • Max 12\n"));
    assert!(out.contains("⚪ White: 0/6   ⚫ Black: 0/6"));
    assert_eq!(out.matches(OPEN_SLOT).count(), 2 * MAX_PER_TEAM);
    assert!(out.contains(NO_SUBSTITUTES));
    assert!(!out.contains(LOADING));
}

#[test]
fn seated_players_fill_slots_in_order() {
    let out = render_page(&EventInfo::default(), &loaded(&[Team::White, Team::Black, Team::White]));
    assert!(out.contains("⚪ White: 2/6   ⚫ Black: 1/6"));
    assert!(out.contains("  1. Player1 L.\n  2. Player3 L.\n  3. Open slot\n"));
    assert!(out.contains("⚫ Black team\n  1. Player2 L.\n"));
    assert_eq!(out.matches(OPEN_SLOT).count(), 9);
}

#[test]
fn substitutes_list_their_tagged_team() {
    let mut teams = vec![Team::White; 7];
    teams.push(Team::Sub);
    let out = render_page(&EventInfo::default(), &loaded(&teams));
    assert!(out.contains("❄️ Substitutes\n  1. Player7 L. (White)\n  2. Player8 L. (Substitute)\n"));
    assert!(!out.contains(NO_SUBSTITUTES));
}

#[test]
fn loading_and_message_lines_are_shown() {
    let mut state = PageState::default();
    state.message = Some("Something happened".into());
    let event = EventInfo { title: "Friday Ice".into(), subtitle: "Rink 2".into() };
    let out = render_page(&event, &state);
    assert!(out.starts_with("🏒 Friday Ice\nRink 2\n"));
    assert!(out.contains("\nSomething happened\n"));
    assert!(out.contains(LOADING));
}

#[test]
fn render_matches_partition() {
    let state = loaded(&[Team::Black; 8]);
    assert_eq!(state.roster, partition(&state.rows));
    let out = render_page(&EventInfo::default(), &state);
    assert!(out.contains("⚫ Black: 6/6"));
    assert!(out.contains("  2. Player8 L. (Black)"));
}

#[test]
fn sections_are_separated_by_one_blank_line() {
    let mut state = loaded(&[]);
    state.message = Some("Hi".into());
    let out = render_page(&EventInfo::default(), &state);
    assert!(out.contains("⚪ White: 0/6   ⚫ Black: 0/6\n\nHi\n\n⚪ White team\n  1. Open slot\n"));
    assert!(out.contains("  6. Open slot\n\n⚫ Black team\n"));
    assert!(out.ends_with("  6. Open slot\n\n❄️ Substitutes\n  Nobody yet.\n"));
    assert!(!out.contains("\n\n\n"));
}
