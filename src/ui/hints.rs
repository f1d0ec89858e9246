//! Footer hint composition for each route and interaction mode.

use crate::app::state::{AppState, PostScreenState};
use crate::domain::{CollectionKind, Route};
use crate::ui::components::footer::Hint;

pub fn build(state: &AppState) -> Vec<Hint> {
    if state.input.is_some() {
        return input_hints();
    }

    match state.route {
        Route::Collections => collections_hints(state),
        Route::Post => match state.post.as_ref() {
            Some(post) => post_hints(post),
            None => vec![Hint::new("b", "back"), Hint::new("q", "quit")],
        },
    }
}

fn input_hints() -> Vec<Hint> {
    vec![
        Hint::new("type", "write"),
        Hint::new("enter", "submit"),
        Hint::new("C-n", "newline"),
        Hint::new("C-e", "open editor"),
        Hint::new("esc", "cancel and keep draft"),
    ]
}

fn collections_hints(state: &AppState) -> Vec<Hint> {
    if state.collections.is_search_focused() {
        return vec![
            Hint::new("type", "edit query"),
            Hint::new("backspace", "delete"),
            Hint::new("enter/esc", "unfocus"),
        ];
    }

    let mut hints = vec![
        Hint::new("tab/S-tab", "switch list"),
        Hint::new("j/k", "move"),
        Hint::new("f", "filter"),
        Hint::new("n/p", "page"),
        Hint::new("]/[", "page block"),
        Hint::new("g/G", "first/last"),
        Hint::new("s", "search"),
    ];
    if state.collections.active == CollectionKind::Activities {
        hints.push(Hint::new("enter", "open post"));
    }
    hints.push(Hint::new("R", "reload"));
    hints.push(Hint::new("q", "quit"));
    hints
}

fn post_hints(post: &PostScreenState) -> Vec<Hint> {
    let mut hints = vec![
        Hint::new("j/k", "move"),
        Hint::new("PgUp/PgDn", "scroll"),
        Hint::new("c", "comment"),
    ];

    if let Some(row) = post.selected() {
        if row.reply_count > 0 || row.depth > 0 {
            hints.push(Hint::new("o/z", "collapse"));
        }
        if row.can_reply {
            hints.push(Hint::new("r", "reply"));
        }
        if row.is_own {
            hints.push(Hint::new("e", "edit"));
        }
    }

    hints.push(Hint::new("b", "back"));
    hints.push(Hint::new("R", "reload"));
    hints.push(Hint::new("q", "quit"));
    hints
}

#[cfg(test)]
mod tests {
    use super::build;
    use crate::app::state::AppState;
    use crate::config::PageSizes;
    use crate::fixtures;

    fn keys(state: &AppState) -> Vec<&'static str> {
        build(state).into_iter().map(|hint| hint.key).collect()
    }

    #[test]
    fn reply_hint_only_on_top_level_rows() {
        let mut state = AppState::new(PageSizes::default(), None);
        state.set_snapshot("demo".to_owned(), fixtures::demo_snapshot());
        state.open_post("post-1");
        assert!(keys(&state).contains(&"r"));

        if let Some(post) = state.post.as_mut() {
            post.move_down();
        }
        let hints = keys(&state);
        assert!(!hints.contains(&"r"));
        assert!(hints.contains(&"e"));
    }
}
