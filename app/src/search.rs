/// Material-tag search/filter engine
///
/// The remote collection can only answer an "any-of" membership filter
/// (OR semantics, bounded value list), so tag search runs in two phases:
/// one broad remote query, then an in-memory refinement that keeps only
/// the posts containing **every** selected tag. The refinement is exact
/// and case-sensitive; the free-text variant below is the loose,
/// case-insensitive counterpart used by the manual search screen.
use crate::db::{post_repo, DocumentStore};
use crate::error::Result;
use crate::models::Post;

/// The selectable material tags, as presented by the tag picker.
pub const MATERIAL_CATALOG: [&str; 7] = [
    "Water Bottle",
    "Toliet Paper Rolls",
    "Soda Bottle",
    "Tissue Boxes",
    "Soda Can",
    "Cardboard",
    "Paper",
];

/// Keep only the posts whose materials are a superset of `selected`.
///
/// Tags compare by exact, case-sensitive string equality. An empty
/// selection yields an empty result, never the full post set.
pub fn filter_posts(posts: Vec<Post>, selected: &[String]) -> Vec<Post> {
    if selected.is_empty() {
        return Vec::new();
    }
    posts
        .into_iter()
        .filter(|post| {
            selected
                .iter()
                .all(|tag| post.materials.iter().any(|m| m == tag))
        })
        .collect()
}

/// Loose free-text match: every search term must be a case-insensitive
/// substring of at least one of the post's materials.
pub fn filter_posts_by_terms(posts: Vec<Post>, terms: &[String]) -> Vec<Post> {
    if terms.is_empty() {
        return Vec::new();
    }
    let needles: Vec<String> = terms.iter().map(|t| t.to_lowercase()).collect();
    posts
        .into_iter()
        .filter(|post| {
            needles.iter().all(|needle| {
                post.materials
                    .iter()
                    .any(|m| m.to_lowercase().contains(needle))
            })
        })
        .collect()
}

/// Two-phase tag search: broad remote any-of query, then local AND
/// refinement.
///
/// An empty selection short-circuits without touching the remote store.
/// A selection larger than the remote any-of bound fails the query; no
/// chunking is attempted so results never silently change.
pub async fn search_by_materials(
    store: &dyn DocumentStore,
    selected: &[String],
) -> Result<Vec<Post>> {
    if selected.is_empty() {
        return Ok(Vec::new());
    }
    let broad = post_repo::find_by_any_material(store, selected).await?;
    Ok(filter_posts(broad, selected))
}
