//! Catalog loading and validation.
//!
//! Stage 1 of the build pipeline. Reads the JSON catalog from the source
//! directory and produces the validated, ordered list of games that every
//! renderer consumes.
//!
//! ## Catalog Format
//!
//! The catalog is a single JSON array of game records:
//!
//! ```text
//! [
//!   {
//!     "title": "Sniper: Elite 3",
//!     "category": "Shooting",
//!     "description": "Long-range duels across three warzones.",
//!     "instructions": "Mouse to aim\nClick to fire",
//!     "tags": ["sniper", "3d"],
//!     "thumbnailUrl": "https://imgs.crazygames.com/sniper-elite-3.png",
//!     "playUrl": "https://www.crazygames.com/game/sniper-elite-3"
//!   }
//! ]
//! ```
//!
//! `games.json` is the canonical filename; `crazy_games.json` is accepted as
//! a legacy fallback. Field spellings from older catalog dumps
//! (`thumbnailUrl`, `playUrl`, `embedUrl`) are accepted via serde aliases.
//!
//! ## Validation
//!
//! Records are skipped, never fatal:
//! - missing or empty `title` → no card, no detail page
//! - missing or empty `category` → same
//! - `category` outside the closed set → same (typos are surfaced in the
//!   summary rather than silently filed under Other)
//!
//! A record with a valid category but no title still counts toward that
//! category's game total, which feeds the category page's statistics line.
//! Skips are tallied per reason and reported at the end of the run; only a
//! catalog that cannot be read at all aborts the build.

use crate::slug::slugify;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("no catalog file in {0} (expected games.json or crazy_games.json)")]
    Missing(PathBuf),
}

/// Catalog filenames probed in order. First hit wins.
pub const CATALOG_FILES: [&str; 2] = ["games.json", "crazy_games.json"];

// =============================================================================
// Categories
// =============================================================================

/// The closed set of game categories.
///
/// This enum is the single source of truth for everything category-shaped:
/// the catalog key matched against records, the display label shown on
/// pages, the output directory under `games/`, and the `{{…_active}}`
/// navigation marker key. No other table of category strings exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Action,
    Adventure,
    Racing,
    Driving,
    Shooting,
    Puzzle,
    Sports,
    Casual,
    Clicker,
    Io,
    Beauty,
    Other,
}

impl Category {
    /// Every category, in navigation/display order.
    pub const ALL: [Category; 12] = [
        Category::Action,
        Category::Adventure,
        Category::Racing,
        Category::Driving,
        Category::Shooting,
        Category::Puzzle,
        Category::Sports,
        Category::Casual,
        Category::Clicker,
        Category::Io,
        Category::Beauty,
        Category::Other,
    ];

    /// The key used in catalog records.
    pub fn key(self) -> &'static str {
        match self {
            Category::Action => "Action",
            Category::Adventure => "Adventure",
            Category::Racing => "Racing",
            Category::Driving => "Driving",
            Category::Shooting => "Shooting",
            Category::Puzzle => "Puzzle",
            Category::Sports => "Sports",
            Category::Casual => "Casual",
            Category::Clicker => "Clicker",
            Category::Io => ".io",
            Category::Beauty => "Beauty",
            Category::Other => "Other",
        }
    }

    /// Display label shown on cards and navigation entries.
    pub fn label(self) -> &'static str {
        match self {
            Category::Io => ".IO Games",
            other => other.key(),
        }
    }

    /// Output directory name under `games/` (the lowercased key).
    pub fn dir(self) -> &'static str {
        match self {
            Category::Action => "action",
            Category::Adventure => "adventure",
            Category::Racing => "racing",
            Category::Driving => "driving",
            Category::Shooting => "shooting",
            Category::Puzzle => "puzzle",
            Category::Sports => "sports",
            Category::Casual => "casual",
            Category::Clicker => "clicker",
            Category::Io => ".io",
            Category::Beauty => "beauty",
            Category::Other => "other",
        }
    }

    /// Template placeholder key for the navigation active marker.
    /// The leading dot of `.io` is dropped to keep the key identifier-like.
    pub fn active_key(self) -> &'static str {
        match self {
            Category::Action => "action_active",
            Category::Adventure => "adventure_active",
            Category::Racing => "racing_active",
            Category::Driving => "driving_active",
            Category::Shooting => "shooting_active",
            Category::Puzzle => "puzzle_active",
            Category::Sports => "sports_active",
            Category::Casual => "casual_active",
            Category::Clicker => "clicker_active",
            Category::Io => "io_active",
            Category::Beauty => "beauty_active",
            Category::Other => "other_active",
        }
    }

    /// Page-title noun: the label with any trailing " Games" stripped, so
    /// headers can append "Games" without doubling it for `.IO Games`.
    pub fn title_noun(self) -> &'static str {
        match self {
            Category::Io => ".IO",
            other => other.label(),
        }
    }

    /// Look up a category by its catalog key. Exact match only.
    pub fn from_key(key: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Depth-0 href of this category's index page.
    pub fn index_href(self) -> String {
        format!("games/{}/index.html", self.dir())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// =============================================================================
// Game records
// =============================================================================

/// Raw catalog record as it appears on disk. Every field is optional at
/// this layer; validation decides what survives.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawGame {
    title: Option<String>,
    category: Option<String>,
    description: String,
    instructions: String,
    tags: Vec<String>,
    #[serde(alias = "thumbnailUrl")]
    thumb: Option<String>,
    #[serde(alias = "playUrl")]
    url: String,
    #[serde(alias = "embedUrl")]
    embed_url: Option<String>,
}

/// A validated game record, ready for rendering.
#[derive(Debug, Clone)]
pub struct Game {
    /// Display title, verbatim from the catalog.
    pub title: String,
    pub category: Category,
    /// Filename/URL slug derived from the title.
    pub slug: String,
    /// May be empty. List views truncate it; the detail page shows it whole.
    pub description: String,
    /// May be empty. Newlines render as line breaks on the detail page.
    pub instructions: String,
    pub tags: Vec<String>,
    /// Thumbnail URL; `None` falls back to the bundled placeholder image.
    pub thumb: Option<String>,
    /// Outbound play link.
    pub url: String,
    /// Iframe source for the embedded player.
    pub embed_url: String,
}

const PLAY_URL_PREFIX: &str = "https://www.crazygames.com/game/";
const EMBED_URL_PREFIX: &str = "https://www.crazygames.com/embed/";

/// Derive an embeddable player URL from an outbound play URL.
///
/// CrazyGames hosts play pages under `/game/<name>` and the matching
/// embed endpoint under `/embed/<name>`. URLs from other hosts pass
/// through unchanged.
fn derive_embed_url(url: &str) -> String {
    match url.strip_prefix(PLAY_URL_PREFIX) {
        Some(rest) => format!("{EMBED_URL_PREFIX}{rest}"),
        None => url.to_string(),
    }
}

impl Game {
    /// Output path of this game's detail page, relative to the site root.
    /// Doubles as the depth-0 href used on home-page cards.
    pub fn detail_href(&self) -> String {
        format!("games/{}/{}.html", self.category.dir(), self.slug)
    }
}

// =============================================================================
// Loading and validation
// =============================================================================

/// Why a record was excluded from rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingTitle,
    MissingCategory,
    UnknownCategory,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::MissingTitle => "missing title",
            SkipReason::MissingCategory => "missing category",
            SkipReason::UnknownCategory => "unknown category",
        };
        f.write_str(text)
    }
}

/// One excluded record, kept for the summary log.
#[derive(Debug, Clone)]
pub struct SkippedRecord {
    /// Zero-based index in the catalog array.
    pub index: usize,
    pub reason: SkipReason,
    /// Whatever identification the record offered: its title, or its raw
    /// category key for unknown-category skips.
    pub detail: String,
}

/// Per-run record accounting, reported in the build summary.
#[derive(Debug, Clone, Default)]
pub struct CatalogStats {
    pub total_records: usize,
    pub missing_title: usize,
    pub missing_category: usize,
    pub unknown_category: usize,
}

impl CatalogStats {
    pub fn skipped(&self) -> usize {
        self.missing_title + self.missing_category + self.unknown_category
    }
}

/// The validated catalog shared read-only by every renderer.
#[derive(Debug)]
pub struct Catalog {
    /// Fully-valid games in exact catalog order. Home pagination slices
    /// this sequence directly.
    pub games: Vec<Game>,
    /// Record count per category, including title-less records. Feeds the
    /// category page statistics line.
    pub category_totals: BTreeMap<Category, usize>,
    pub stats: CatalogStats,
    pub skipped: Vec<SkippedRecord>,
    /// The file the catalog was read from.
    pub source_file: PathBuf,
}

impl Catalog {
    /// Games of one category, in catalog order.
    pub fn games_in(&self, category: Category) -> impl Iterator<Item = &Game> {
        self.games.iter().filter(move |g| g.category == category)
    }

    /// Record total for a category (0 when absent from the catalog).
    pub fn total_for(&self, category: Category) -> usize {
        self.category_totals.get(&category).copied().unwrap_or(0)
    }
}

/// Locate the catalog file in the source directory.
pub fn find_catalog_file(source_root: &Path) -> Option<PathBuf> {
    CATALOG_FILES
        .iter()
        .map(|name| source_root.join(name))
        .find(|path| path.is_file())
}

/// Load and validate the catalog from the source directory.
///
/// This is the only fatal input path in the build: a missing, unreadable,
/// or non-array catalog aborts the run before anything is written.
pub fn load_catalog(source_root: &Path) -> Result<Catalog, CatalogError> {
    let path = find_catalog_file(source_root)
        .ok_or_else(|| CatalogError::Missing(source_root.to_path_buf()))?;
    let content = fs::read_to_string(&path)?;
    let raw: Vec<RawGame> = serde_json::from_str(&content).map_err(|source| CatalogError::Json {
        path: path.clone(),
        source,
    })?;
    Ok(validate(raw, path))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Turn raw records into the validated catalog, tallying skips.
fn validate(raw: Vec<RawGame>, source_file: PathBuf) -> Catalog {
    let mut games = Vec::with_capacity(raw.len());
    let mut category_totals: BTreeMap<Category, usize> = BTreeMap::new();
    let mut stats = CatalogStats {
        total_records: raw.len(),
        ..CatalogStats::default()
    };
    let mut skipped = Vec::new();

    for (index, record) in raw.into_iter().enumerate() {
        let title = non_empty(record.title);
        let category = match non_empty(record.category) {
            None => {
                stats.missing_category += 1;
                skipped.push(SkippedRecord {
                    index,
                    reason: SkipReason::MissingCategory,
                    detail: title.unwrap_or_default(),
                });
                continue;
            }
            Some(key) => match Category::from_key(&key) {
                None => {
                    stats.unknown_category += 1;
                    skipped.push(SkippedRecord {
                        index,
                        reason: SkipReason::UnknownCategory,
                        detail: key,
                    });
                    continue;
                }
                Some(category) => category,
            },
        };

        // Counts even when the title is missing below.
        *category_totals.entry(category).or_insert(0) += 1;

        let Some(title) = title else {
            stats.missing_title += 1;
            skipped.push(SkippedRecord {
                index,
                reason: SkipReason::MissingTitle,
                detail: category.key().to_string(),
            });
            continue;
        };

        let slug = slugify(&title);
        let embed_url = non_empty(record.embed_url).unwrap_or_else(|| derive_embed_url(&record.url));
        games.push(Game {
            title,
            category,
            slug,
            description: record.description,
            instructions: record.instructions,
            tags: record.tags,
            thumb: non_empty(record.thumb),
            url: record.url,
            embed_url,
        });
    }

    Catalog {
        games,
        category_totals,
        stats,
        skipped,
        source_file,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_catalog(dir: &TempDir, name: &str, json: &str) {
        fs::write(dir.path().join(name), json).unwrap();
    }

    // =========================================================================
    // Category table
    // =========================================================================

    #[test]
    fn category_set_is_closed_at_twelve() {
        assert_eq!(Category::ALL.len(), 12);
    }

    #[test]
    fn from_key_round_trips_every_category() {
        for category in Category::ALL {
            assert_eq!(Category::from_key(category.key()), Some(category));
        }
    }

    #[test]
    fn from_key_is_exact_match() {
        assert_eq!(Category::from_key("action"), None);
        assert_eq!(Category::from_key("Acton"), None);
        assert_eq!(Category::from_key(""), None);
    }

    #[test]
    fn dirs_are_lowercased_keys() {
        for category in Category::ALL {
            assert_eq!(category.dir(), category.key().to_lowercase());
        }
    }

    #[test]
    fn io_category_table_entries() {
        let io = Category::Io;
        assert_eq!(io.key(), ".io");
        assert_eq!(io.label(), ".IO Games");
        assert_eq!(io.dir(), ".io");
        assert_eq!(io.active_key(), "io_active");
        assert_eq!(io.title_noun(), ".IO");
    }

    #[test]
    fn active_keys_are_identifier_like() {
        for category in Category::ALL {
            let key = category.active_key();
            assert!(key.ends_with("_active"));
            assert!(key.chars().all(|c| c.is_ascii_lowercase() || c == '_'));
        }
    }

    #[test]
    fn index_href_uses_dir() {
        assert_eq!(Category::Shooting.index_href(), "games/shooting/index.html");
        assert_eq!(Category::Io.index_href(), "games/.io/index.html");
    }

    // =========================================================================
    // Embed URL derivation
    // =========================================================================

    #[test]
    fn embed_url_derived_from_crazygames_play_url() {
        assert_eq!(
            derive_embed_url("https://www.crazygames.com/game/moto-x3m"),
            "https://www.crazygames.com/embed/moto-x3m"
        );
    }

    #[test]
    fn foreign_play_url_passes_through() {
        assert_eq!(
            derive_embed_url("https://example.com/play/moto-x3m"),
            "https://example.com/play/moto-x3m"
        );
    }

    #[test]
    fn explicit_embed_url_wins_over_derivation() {
        let tmp = TempDir::new().unwrap();
        write_catalog(
            &tmp,
            "games.json",
            r#"[{
                "title": "Moto X3M",
                "category": "Racing",
                "playUrl": "https://www.crazygames.com/game/moto-x3m",
                "embedUrl": "https://cdn.example.com/embed/moto"
            }]"#,
        );
        let catalog = load_catalog(tmp.path()).unwrap();
        assert_eq!(catalog.games[0].embed_url, "https://cdn.example.com/embed/moto");
    }

    // =========================================================================
    // Loading
    // =========================================================================

    #[test]
    fn missing_catalog_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = load_catalog(tmp.path());
        assert!(matches!(result, Err(CatalogError::Missing(_))));
    }

    #[test]
    fn invalid_json_is_error() {
        let tmp = TempDir::new().unwrap();
        write_catalog(&tmp, "games.json", "not json [");
        let result = load_catalog(tmp.path());
        assert!(matches!(result, Err(CatalogError::Json { .. })));
    }

    #[test]
    fn object_instead_of_array_is_error() {
        let tmp = TempDir::new().unwrap();
        write_catalog(&tmp, "games.json", r#"{"games": []}"#);
        assert!(load_catalog(tmp.path()).is_err());
    }

    #[test]
    fn legacy_filename_is_accepted() {
        let tmp = TempDir::new().unwrap();
        write_catalog(
            &tmp,
            "crazy_games.json",
            r#"[{"title": "Tunnel Rush", "category": "Action"}]"#,
        );
        let catalog = load_catalog(tmp.path()).unwrap();
        assert_eq!(catalog.games.len(), 1);
        assert!(catalog.source_file.ends_with("crazy_games.json"));
    }

    #[test]
    fn canonical_filename_preferred_over_legacy() {
        let tmp = TempDir::new().unwrap();
        write_catalog(&tmp, "games.json", r#"[{"title": "A", "category": "Action"}]"#);
        write_catalog(&tmp, "crazy_games.json", r#"[{"title": "B", "category": "Action"}]"#);
        let catalog = load_catalog(tmp.path()).unwrap();
        assert_eq!(catalog.games[0].title, "A");
    }

    #[test]
    fn field_aliases_accepted() {
        let tmp = TempDir::new().unwrap();
        write_catalog(
            &tmp,
            "games.json",
            r#"[{
                "title": "Sniper: Elite 3",
                "category": "Shooting",
                "thumbnailUrl": "https://imgs.example.com/s.png",
                "playUrl": "https://www.crazygames.com/game/sniper-elite-3"
            }]"#,
        );
        let catalog = load_catalog(tmp.path()).unwrap();
        let game = &catalog.games[0];
        assert_eq!(game.thumb.as_deref(), Some("https://imgs.example.com/s.png"));
        assert_eq!(game.url, "https://www.crazygames.com/game/sniper-elite-3");
        assert_eq!(game.embed_url, "https://www.crazygames.com/embed/sniper-elite-3");
    }

    #[test]
    fn unknown_record_fields_tolerated() {
        let tmp = TempDir::new().unwrap();
        write_catalog(
            &tmp,
            "games.json",
            r#"[{"title": "A", "category": "Action", "id": 77, "votes": [1, 2]}]"#,
        );
        let catalog = load_catalog(tmp.path()).unwrap();
        assert_eq!(catalog.games.len(), 1);
    }

    #[test]
    fn catalog_order_preserved() {
        let tmp = TempDir::new().unwrap();
        write_catalog(
            &tmp,
            "games.json",
            r#"[
                {"title": "C", "category": "Action"},
                {"title": "A", "category": "Puzzle"},
                {"title": "B", "category": "Action"}
            ]"#,
        );
        let catalog = load_catalog(tmp.path()).unwrap();
        let titles: Vec<&str> = catalog.games.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, ["C", "A", "B"]);
    }

    // =========================================================================
    // Validation and skip accounting
    // =========================================================================

    #[test]
    fn missing_category_skipped_and_tallied() {
        let tmp = TempDir::new().unwrap();
        write_catalog(
            &tmp,
            "games.json",
            r#"[
                {"title": "Kept", "category": "Action"},
                {"title": "Dropped"}
            ]"#,
        );
        let catalog = load_catalog(tmp.path()).unwrap();
        assert_eq!(catalog.games.len(), 1);
        assert_eq!(catalog.stats.missing_category, 1);
        assert_eq!(catalog.stats.skipped(), 1);
        assert_eq!(catalog.skipped[0].reason, SkipReason::MissingCategory);
        assert_eq!(catalog.skipped[0].index, 1);
        assert_eq!(catalog.skipped[0].detail, "Dropped");
    }

    #[test]
    fn empty_title_counts_as_missing() {
        let tmp = TempDir::new().unwrap();
        write_catalog(
            &tmp,
            "games.json",
            r#"[{"title": "", "category": "Action"}]"#,
        );
        let catalog = load_catalog(tmp.path()).unwrap();
        assert!(catalog.games.is_empty());
        assert_eq!(catalog.stats.missing_title, 1);
    }

    #[test]
    fn unknown_category_skipped_not_filed_under_other() {
        let tmp = TempDir::new().unwrap();
        write_catalog(
            &tmp,
            "games.json",
            r#"[{"title": "Typo", "category": "Actoin"}]"#,
        );
        let catalog = load_catalog(tmp.path()).unwrap();
        assert!(catalog.games.is_empty());
        assert_eq!(catalog.stats.unknown_category, 1);
        assert_eq!(catalog.total_for(Category::Other), 0);
        assert_eq!(catalog.skipped[0].detail, "Actoin");
    }

    #[test]
    fn titleless_record_still_counts_toward_category_total() {
        let tmp = TempDir::new().unwrap();
        write_catalog(
            &tmp,
            "games.json",
            r#"[
                {"title": "Named", "category": "Racing"},
                {"category": "Racing"}
            ]"#,
        );
        let catalog = load_catalog(tmp.path()).unwrap();
        assert_eq!(catalog.games.len(), 1);
        assert_eq!(catalog.total_for(Category::Racing), 2);
        assert_eq!(catalog.stats.missing_title, 1);
    }

    #[test]
    fn games_in_filters_by_category_in_order() {
        let tmp = TempDir::new().unwrap();
        write_catalog(
            &tmp,
            "games.json",
            r#"[
                {"title": "R1", "category": "Racing"},
                {"title": "P1", "category": "Puzzle"},
                {"title": "R2", "category": "Racing"}
            ]"#,
        );
        let catalog = load_catalog(tmp.path()).unwrap();
        let racing: Vec<&str> = catalog
            .games_in(Category::Racing)
            .map(|g| g.title.as_str())
            .collect();
        assert_eq!(racing, ["R1", "R2"]);
    }

    #[test]
    fn slug_and_detail_href_derived_from_title() {
        let tmp = TempDir::new().unwrap();
        write_catalog(
            &tmp,
            "games.json",
            r#"[{"title": "Sniper: Elite 3", "category": "Shooting"}]"#,
        );
        let catalog = load_catalog(tmp.path()).unwrap();
        let game = &catalog.games[0];
        assert_eq!(game.slug, "sniper_elite_3");
        assert_eq!(game.detail_href(), "games/shooting/sniper_elite_3.html");
    }

    #[test]
    fn missing_thumb_is_none_empty_thumb_is_none() {
        let tmp = TempDir::new().unwrap();
        write_catalog(
            &tmp,
            "games.json",
            r#"[
                {"title": "A", "category": "Action"},
                {"title": "B", "category": "Action", "thumb": ""}
            ]"#,
        );
        let catalog = load_catalog(tmp.path()).unwrap();
        assert_eq!(catalog.games[0].thumb, None);
        assert_eq!(catalog.games[1].thumb, None);
    }

    #[test]
    fn empty_catalog_is_valid() {
        let tmp = TempDir::new().unwrap();
        write_catalog(&tmp, "games.json", "[]");
        let catalog = load_catalog(tmp.path()).unwrap();
        assert!(catalog.games.is_empty());
        assert_eq!(catalog.stats.total_records, 0);
        assert_eq!(catalog.stats.skipped(), 0);
    }
}
