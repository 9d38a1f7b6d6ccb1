//! Top-level rendering coordinator.
//!
//! Rendering is two steps: the state is projected into a [`UIViewModel`],
//! then the components draw that view model into a [`Canvas`] which is printed
//! to the plugin pane in one write.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::helpers::Canvas;
use crate::ui::viewmodel::UIViewModel;
use crate::ui::theme::Theme;

/// Renders the plugin UI to stdout.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    print!("{}", render_to_string(state, rows, cols));
}

/// Renders one frame into a string of text and ANSI escape sequences.
#[must_use]
pub fn render_to_string(state: &AppState, rows: usize, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel(rows, cols);
    render_viewmodel(&viewmodel, &state.theme, rows, cols)
}

/// Renders a precomputed view model.
#[must_use]
pub fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) -> String {
    let mut canvas = Canvas::new();
    components::render_layout(&mut canvas, vm, theme, rows, cols);
    canvas.into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, FetchFailure, Person, ResultList};
    use crate::ui::helpers::strip_ansi;

    fn frame(state: &AppState) -> String {
        strip_ansi(&render_to_string(state, 40, 100))
    }

    #[test]
    fn error_frame_shows_message_and_retry() {
        let mut state = AppState::new(Theme::default(), 0.3);
        let request = state.issue_fetch();
        state.apply_fetch_result(request.seq, Err(FetchFailure::new("Network Error")));

        let text = frame(&state);
        assert!(text.contains("Network Error"));
        assert!(text.contains("[ Try Again ]"));
        assert!(!text.contains("Loading"));
    }

    #[test]
    fn empty_frame_shows_category_message() {
        let mut state = AppState::new(Theme::default(), 0.3);
        let request = state.issue_fetch();
        state.apply_fetch_result(request.seq, Ok(ResultList::empty(Category::People)));

        let text = frame(&state);
        assert!(text.contains("No characters found"));
        assert!(text.contains("Search characters..."));
        assert!(!text.contains("Try Again"));
    }

    #[test]
    fn cards_frame_shows_badge_and_names() {
        let mut state = AppState::new(Theme::default(), 0.3);
        let request = state.issue_fetch();
        let people = ["Luke Skywalker", "Leia Organa"]
            .into_iter()
            .map(|name| Person {
                name: name.to_string(),
                ..Person::default()
            })
            .collect();
        state.apply_fetch_result(request.seq, Ok(ResultList::People(people)));

        let text = frame(&state);
        assert!(text.contains("1 Characters  2 "));
        assert!(text.contains("LUKE SKYWALKER"));
        assert!(text.contains("LEIA ORGANA"));
    }

    #[test]
    fn films_frame_has_no_search_box() {
        let mut state = AppState::new(Theme::default(), 0.3);
        state.select_category(Category::Films);

        let text = frame(&state);
        assert!(text.contains("Loading films..."));
        assert!(!text.contains("Search"));
        assert!(!text.contains("Sort:"));
    }

    #[test]
    fn tiny_pane_does_not_panic() {
        let mut state = AppState::new(Theme::default(), 0.3);
        state.issue_fetch();
        let _ = render_to_string(&state, 3, 5);
        let _ = render_to_string(&state, 0, 0);
    }
}
