//! Depth-aware link resolution.
//!
//! Every renderer produces markup as if its page lived at the site root:
//! stylesheets at `assets/css/style.css`, home at `index.html`, category
//! indexes at `games/<dir>/index.html`, detail pages at
//! `games/<dir>/<slug>.html`. Pages that physically live at the root are
//! done at that point. Pages under `games/<dir>/` (category indexes and
//! detail pages alike, both two directory levels down) are rewritten here
//! for their true location.
//!
//! ## Rule Table
//!
//! [`resolve_links`] applies a closed, ordered set of rewrites. Every rule
//! matches quote-anchored attribute prefixes (`href="…`, `src="…`) and
//! produces text no rule matches again, so resolving an already-resolved
//! page is a no-op. In order:
//!
//! | # | Applies to | Rewrite |
//! |---|------------|---------|
//! | 0 | all pages  | absolute legacy forms → root-relative (`/assets/…`, `/games/…`, `/`) |
//! | 1 | all pages  | drop the decommissioned search-script tag |
//! | 2 | nested     | `assets/…` refs gain the `../../` hop to the root |
//! | 3 | nested     | `index.html` (home/logo) → `../../index.html` |
//! | 4 | nested     | `games/<dir>/index.html` → `../<dir>/index.html`, every known dir |
//! | 5 | nested, own category | remaining `games/<own>/…` → same-directory `…` |
//! | 6 | nested     | remaining `games/<dir>/…` → `../<dir>/…`, every known dir |
//!
//! Rule 4 covers the page's own category too; that keeps its nav self-link
//! out of rule 3's and rule 5's reach and is what makes the pass idempotent.
//!
//! ## Unresolved References
//!
//! A reference under `games/` whose first segment is not a known category
//! directory matches no rule and survives verbatim. [`unresolved_references`]
//! reports such leftovers (plus any absolute paths rule 0 did not cover) so
//! the build can tally them; they are never an error.

use crate::catalog::Category;

/// Where a page physically lives, which decides how many `../` hops its
/// root-anchored references need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDepth {
    /// `index.html`, `page<N>.html` at the site root.
    Root,
    /// `games/<dir>/index.html`.
    Category,
    /// `games/<dir>/<slug>.html`.
    Detail,
}

impl PageDepth {
    /// Prefix that reaches the site root from this depth.
    pub fn root_prefix(self) -> &'static str {
        match self {
            PageDepth::Root => "",
            PageDepth::Category | PageDepth::Detail => "../../",
        }
    }

    fn is_nested(self) -> bool {
        self != PageDepth::Root
    }
}

/// The search feature was removed from the site; its script tag is stripped
/// from templates wherever (and however deep) it appears.
const SEARCH_SCRIPT_TAGS: [&str; 3] = [
    r#"<script src="assets/js/search.js"></script>"#,
    r#"<script src="../assets/js/search.js"></script>"#,
    r#"<script src="../../assets/js/search.js"></script>"#,
];

/// Rewrite depth-0 markup for the page's true directory depth.
///
/// `current` is the category whose directory the page lives in, for pages
/// under `games/`; it lets rule 5 flatten links to that category's own
/// detail pages into bare `<slug>.html` references.
pub fn resolve_links(html: &str, depth: PageDepth, current: Option<Category>) -> String {
    let mut html = normalize_absolute(html);
    html = strip_search_script(&html);
    if !depth.is_nested() {
        return html;
    }

    // Rule 2: root-anchored assets.
    html = html.replace("href=\"assets/", "href=\"../../assets/");
    html = html.replace("src=\"assets/", "src=\"../../assets/");

    // Rule 3: home and logo links.
    html = html.replace("href=\"index.html\"", "href=\"../../index.html\"");

    // Rule 4: category index links, the page's own category included.
    for category in Category::ALL {
        html = html.replace(
            &format!("href=\"games/{}/index.html\"", category.dir()),
            &format!("href=\"../{}/index.html\"", category.dir()),
        );
    }

    // Rule 5: links into the page's own directory lose their prefix.
    if let Some(own) = current {
        html = html.replace(&format!("href=\"games/{}/", own.dir()), "href=\"");
    }

    // Rule 6: whatever still points into a known category directory is a
    // cross-category reference.
    for category in Category::ALL {
        html = html.replace(
            &format!("href=\"games/{}/", category.dir()),
            &format!("href=\"../{}/", category.dir()),
        );
    }

    html
}

/// Rule 0: templates from the site's server-rooted era carry absolute
/// paths; fold them into the root-relative forms the other rules expect.
fn normalize_absolute(html: &str) -> String {
    html.replace("href=\"/assets/", "href=\"assets/")
        .replace("src=\"/assets/", "src=\"assets/")
        .replace("href=\"/games/", "href=\"games/")
        .replace("href=\"/index.html\"", "href=\"index.html\"")
        .replace("href=\"/\"", "href=\"index.html\"")
}

/// Rule 1: drop the search-script tag, trailing newline included.
fn strip_search_script(html: &str) -> String {
    let mut html = html.to_string();
    for tag in SEARCH_SCRIPT_TAGS {
        let with_newline = format!("{tag}\n");
        html = html.replace(&with_newline, "");
        html = html.replace(tag, "");
    }
    html
}

// =============================================================================
// Unresolved-reference audit
// =============================================================================

/// Collect `href`/`src` values the resolver could not have handled:
/// references into `games/` with an unknown category segment, unexpected
/// same-level directories from nested pages, and absolute paths that
/// survived normalization.
pub fn unresolved_references(html: &str) -> Vec<String> {
    let mut found = Vec::new();
    for attr in ["href=\"", "src=\""] {
        let mut rest = html;
        while let Some(pos) = rest.find(attr) {
            let value_and_tail = &rest[pos + attr.len()..];
            let Some(end) = value_and_tail.find('"') else {
                break;
            };
            let value = &value_and_tail[..end];
            if is_unresolved(value) {
                found.push(value.to_string());
            }
            rest = &value_and_tail[end..];
        }
    }
    found
}

fn known_dir(segment: &str) -> bool {
    segment == "assets" || Category::ALL.iter().any(|c| c.dir() == segment)
}

fn is_unresolved(value: &str) -> bool {
    // Protocol-relative and fully-qualified URLs are external, not ours.
    if value.starts_with("//") {
        return false;
    }
    if value.starts_with('/') {
        return true;
    }
    if let Some(rest) = value.strip_prefix("games/") {
        let segment = rest.split('/').next().unwrap_or("");
        return !Category::ALL.iter().any(|c| c.dir() == segment);
    }
    // From nested pages: hops must land in a known sibling directory,
    // the assets tree, or a root-level page.
    let mut rest = value;
    let mut hopped = false;
    while let Some(stripped) = rest.strip_prefix("../") {
        rest = stripped;
        hopped = true;
    }
    if hopped {
        if let Some((segment, _)) = rest.split_once('/') {
            return !known_dir(segment);
        }
    }
    false
}
