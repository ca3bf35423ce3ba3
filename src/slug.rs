//! Slug derivation for game titles.
//!
//! Every detail page is named after its game's title, so titles must be
//! reduced to something that is safe both as a filename and as a URL path
//! segment. The rules are fixed and deterministic:
//!
//! 1. Strip the characters that are illegal in filenames: `< > : " / \ | ? *`
//! 2. Replace spaces with underscores
//! 3. Lowercase the result
//!
//! Two titles that differ only in stripped characters produce the same slug;
//! the later game in catalog order overwrites the earlier one's output file.
//! That is accepted behavior, not an error.

/// Characters stripped from titles before slugging. Illegal in filenames on
/// at least one supported platform.
const ILLEGAL: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Derive a filesystem-and-URL-safe slug from a game title.
///
/// - `"Sniper: Elite 3"` → `"sniper_elite_3"`
/// - `"Bad/Name?"` → `"badname"`
/// - `"UPPER CASE"` → `"upper_case"`
///
/// Total and pure: every input produces a slug, identical inputs produce
/// identical slugs. For titles built from letters, digits, and spaces the
/// output matches `[a-z0-9_]+`.
pub fn slugify(title: &str) -> String {
    title
        .chars()
        .filter(|c| !ILLEGAL.contains(c))
        .map(|c| if c == ' ' { '_' } else { c })
        .collect::<String>()
        .to_lowercase()
}
