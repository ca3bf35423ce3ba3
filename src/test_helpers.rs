//! Shared test utilities for the arcade-press test suite.
//!
//! Provides catalog fixtures used across the renderer and pipeline tests:
//! fully-formed `Game` values and in-memory catalogs whose totals agree
//! with their game list.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let catalog = sample_catalog(vec![
//!     sample_game("Tunnel Rush", Category::Action),
//!     sample_game("Moto X3M", Category::Racing),
//! ]);
//! assert_eq!(catalog.total_for(Category::Action), 1);
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::catalog::{Catalog, CatalogStats, Category, Game};
use crate::slug::slugify;

/// A fully-populated game for renderer tests. The outbound and embed URLs
/// follow the upstream convention of hyphenated slugs.
pub fn sample_game(title: &str, category: Category) -> Game {
    let slug = slugify(title);
    let url_slug = slug.replace('_', "-");
    Game {
        title: title.to_string(),
        category,
        slug,
        description: format!("{title} is a browser game."),
        instructions: "Use the arrow keys.".to_string(),
        tags: vec!["html5".to_string()],
        thumb: None,
        url: format!("https://www.crazygames.com/game/{url_slug}"),
        embed_url: format!("https://www.crazygames.com/embed/{url_slug}"),
    }
}

/// An in-memory catalog whose totals and stats agree with `games`.
pub fn sample_catalog(games: Vec<Game>) -> Catalog {
    let mut category_totals = BTreeMap::new();
    for game in &games {
        *category_totals.entry(game.category).or_insert(0) += 1;
    }
    let stats = CatalogStats {
        total_records: games.len(),
        ..CatalogStats::default()
    };
    Catalog {
        games,
        category_totals,
        stats,
        skipped: Vec::new(),
        source_file: PathBuf::from("games.json"),
    }
}
