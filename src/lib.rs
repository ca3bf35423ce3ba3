//! # Arcade Press
//!
//! A minimal static site generator for browsable game catalogs. A flat JSON
//! file is the data source: every record becomes a detail page, every
//! category an index page, and the whole catalog a paginated home listing.
//!
//! # Architecture: One-Pass Pipeline
//!
//! ```text
//! 1. Load     games.json → Catalog     (validate, slug, group, tally skips)
//! 2. Render   Catalog    → pages       (templates + maud bodies, in parallel)
//! 3. Write    pages      → site tree   (plus stylesheet and placeholder)
//! ```
//!
//! Rendering is embarrassingly parallel: every page depends only on the
//! read-only catalog, config, and templates, so the pipeline fans out over a
//! rayon pool and joins at the end. There is no cache and no incremental
//! mode; a full build of a thousand-game catalog is cheap enough to rerun
//! from scratch every time.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalog`] | Stage 1: loads and validates the JSON catalog, tallies skipped records |
//! | [`slug`] | Title to filename/URL slug, used for detail page paths |
//! | [`template`] | `{{key}}` substitution in the header/footer shell fragments |
//! | [`paths`] | Depth-aware link rewriting; pages render root-relative and get fixed up per directory |
//! | [`render`] | Stage 2: the three page renderers (home listing, category index, game detail) |
//! | [`write`] | Stage 3: puts pages on disk, installs stylesheet and placeholder assets |
//! | [`site`] | Build orchestration: page plan, rayon fan-out, build report |
//! | [`config`] | Optional `site.toml` loading and validation |
//! | [`output`] | CLI output formatting: pure `format_*` functions plus print wrappers |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! Page bodies are generated with [Maud](https://maud.lambda.xyz/), a
//! compile-time HTML macro, rather than a runtime template engine: malformed
//! markup is a build error, interpolation is auto-escaped, and the card and
//! pagination fragments are plain Rust functions. The header/footer shell is
//! the one deliberate exception: it stays a `{{key}}` string template so a
//! deployed site can override its chrome without recompiling.
//!
//! ## Render Root-Relative, Resolve Per Depth
//!
//! Every renderer emits links as if its page sat at the site root
//! (`assets/...`, `games/action/index.html`). The path resolver then
//! rewrites the finished document for the page's actual directory depth.
//! Keeping depth out of the renderers means the shell templates, nav, and
//! cards are written exactly once; the rewrite rules are idempotent, so a
//! resolved page can pass through the resolver again unchanged.
//!
//! ## A Closed Category Set
//!
//! Categories are a fixed twelve-variant enum, not data. The enum is the
//! single table behind catalog keys, display labels, directory names, nav
//! targets, and template markers; a record whose category is not in the set
//! is skipped and reported rather than filed under `Other`. Every category
//! page is rendered even when empty, so the sidebar never links to a missing
//! file.
//!
//! ## Best-Effort Builds
//!
//! Only an unloadable catalog aborts a run. Malformed records, config
//! problems, unresolved references, and individual write failures are
//! collected into the build report and printed in the summary; the rest of
//! the site still builds. A generated site with one bad page beats no site
//! at all.

pub mod catalog;
pub mod config;
pub mod output;
pub mod paths;
pub mod render;
pub mod site;
pub mod slug;
pub mod template;
pub mod write;

#[cfg(test)]
pub(crate) mod test_helpers;
