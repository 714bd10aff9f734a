use crate::app::AppState;

/// Recompute the derived filtered view from `users` and `search_query`.
///
/// A user is included iff the lowercased query is a substring of the
/// lowercased name or the lowercased email; the empty query matches
/// everyone. The cursor is clamped into the new view so a shrinking result
/// set never leaves the selection dangling.
pub fn apply_search(app: &mut AppState) {
    let q = app.search_query.to_lowercase();
    if q.is_empty() {
        app.filtered = app.users.clone();
    } else {
        app.filtered = app
            .users
            .iter()
            .filter(|u| u.name.to_lowercase().contains(&q) || u.email.to_lowercase().contains(&q))
            .cloned()
            .collect();
    }
    app.selected_index = app
        .selected_index
        .min(app.filtered.len().saturating_sub(1));
}
