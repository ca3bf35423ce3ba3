//! Page rendering.
//!
//! Stage 2 of the build pipeline. Turns the validated catalog into finished
//! HTML strings, one per page, ready for the site writer.
//!
//! ## Generated Pages
//!
//! - **Home listing** (`/index.html`, `/page<N>.html`): all games as cards,
//!   28 per page, with a pagination control above and below the grid
//! - **Category index** (`/games/<dir>/index.html`): one per category,
//!   cards without descriptions, no pagination
//! - **Game detail** (`/games/<dir>/<slug>.html`): full description,
//!   instructions, embedded player iframe, outbound play link
//!
//! ## Output Structure
//!
//! ```text
//! site/
//! ├── index.html                    # Home listing, page 1
//! ├── page2.html                    # Further home pages
//! ├── assets/
//! │   ├── css/style.css
//! │   └── images/placeholder.svg
//! └── games/
//!     ├── action/
//!     │   ├── index.html            # Category index
//!     │   └── tunnel_rush.html      # Detail pages, named by slug
//!     └── shooting/
//!         ├── index.html
//!         └── sniper_elite_3.html
//! ```
//!
//! ## Composition
//!
//! Each page is `header + body + footer`: the shared shell fragments go
//! through `{{key}}` substitution with the page's standard bindings, the
//! body is built with [maud](https://maud.lambda.xyz/) (type-safe HTML with
//! automatic escaping), and the assembled document goes through the link
//! resolver for the page's depth. Bodies are always written root-relative;
//! only the resolver knows about directory depths.

use crate::catalog::{Catalog, Category, Game};
use crate::config::SiteConfig;
use crate::paths::{self, PageDepth};
use crate::template::{self, Bindings, NavTarget, Templates};
use crate::write::PLACEHOLDER_PATH;
use maud::{Markup, html};

/// List-view description limit in characters, ellipsis included.
pub const DESCRIPTION_MAX_CHARS: usize = 100;

const ELLIPSIS: &str = "...";

/// Everything depth-sensitive about one page. Built immediately before the
/// page is rendered, handed to the writer with the finished string, and
/// dropped once the file is on disk. Never cached across pages.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub depth: PageDepth,
    pub active: NavTarget,
    /// Output path relative to the site root.
    pub path: String,
}

/// A fully-rendered page: resolved HTML plus where it belongs.
#[derive(Debug)]
pub struct RenderedPage {
    pub context: PageContext,
    pub html: String,
}

// =============================================================================
// Shared pieces
// =============================================================================

/// Cap text at `max_chars` characters. Longer text is cut on a character
/// boundary and suffixed with `...` so the result still fits the limit.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Number of home listing pages for a catalog size. At least one page is
/// produced even for an empty catalog, so the site always has a root.
pub fn home_page_count(total_games: usize, per_page: usize) -> usize {
    total_games.div_ceil(per_page).max(1)
}

/// Filename of home listing page `number` (1-based). Page 1 is the site
/// root; later pages sit next to it.
pub fn home_page_filename(number: usize) -> String {
    if number == 1 {
        "index.html".to_string()
    } else {
        format!("page{number}.html")
    }
}

/// One card in a listing grid. Links are rendered root-relative; the
/// resolver flattens them to same-directory filenames on category pages.
fn game_card(game: &Game, with_description: bool) -> Markup {
    let link = game.detail_href();
    let thumb = game.thumb.as_deref().unwrap_or(PLACEHOLDER_PATH);
    html! {
        div.game-card {
            a.game-cover-link href=(link) {
                div.game-cover-container {
                    img.game-cover src=(thumb) alt=(game.title) loading="lazy";
                }
            }
            div.game-info {
                h3 { a href=(link) { (game.title) } }
                div.game-tags {
                    @for tag in &game.tags {
                        span { (tag) }
                    }
                }
                div.game-category {
                    span { (game.category.label()) }
                }
                @if with_description && !game.description.is_empty() {
                    p.game-desc { (truncate_chars(&game.description, DESCRIPTION_MAX_CHARS)) }
                }
                a.play-btn href=(link) { "Play Now" }
            }
        }
    }
}

/// Pagination control for the home listing: previous arrow, every page
/// number, next arrow. The current page and unavailable arrows render as
/// spans, everything else as links.
fn pagination_control(current: usize, total: usize) -> Markup {
    html! {
        div.pagination {
            @if current > 1 {
                a.page-nav.prev href=(home_page_filename(current - 1)) aria-label="Previous page" {
                    i.page-icon { "←" }
                }
            } @else {
                span.page-nav.prev.disabled aria-label="Previous page" {
                    i.page-icon { "←" }
                }
            }
            @for number in 1..=total {
                @if number == current {
                    span.page-number.current { (number) }
                } @else {
                    a.page-number href=(home_page_filename(number)) { (number) }
                }
            }
            @if current < total {
                a.page-nav.next href=(home_page_filename(current + 1)) aria-label="Next page" {
                    i.page-icon { "→" }
                }
            } @else {
                span.page-nav.next.disabled aria-label="Next page" {
                    i.page-icon { "→" }
                }
            }
        }
    }
}

/// Assemble shell + body, bind placeholders, and resolve links for the
/// page's depth.
fn compose(
    templates: &Templates,
    bindings: &Bindings,
    body: Markup,
    context: PageContext,
) -> RenderedPage {
    let header = template::render(&templates.header, bindings);
    let footer = template::render(&templates.footer, bindings);
    let page = format!("{header}{}{footer}", body.into_string());
    let html = paths::resolve_links(&page, context.depth, context.active.category());
    RenderedPage { context, html }
}

// =============================================================================
// Page bindings
// =============================================================================

fn home_bindings(config: &SiteConfig) -> Bindings {
    let site = &config.site_name;
    template::standard_bindings(
        site,
        &format!("Free Online Games - {site}"),
        &format!(
            "Play the best free online games at {site}! Action, shooting, racing, \
             puzzle and more. No download required, play instantly!"
        ),
        "All Games",
        "Play the best free online games instantly with no download required!",
        NavTarget::Home,
    )
}

fn category_bindings(config: &SiteConfig, category: Category, total: usize) -> Bindings {
    let site = &config.site_name;
    let noun = category.title_noun();
    let noun_lower = noun.to_lowercase();
    template::standard_bindings(
        site,
        &format!("{noun} Games - {site}"),
        &format!(
            "Play the best free online {noun_lower} games at {site}! \
             No download required, play instantly in your browser."
        ),
        &format!("{noun} Games"),
        &format!("{total} free {noun_lower} games to play online without download!"),
        NavTarget::Category(category),
    )
}

fn detail_bindings(config: &SiteConfig, game: &Game) -> Bindings {
    let site = &config.site_name;
    template::standard_bindings(
        site,
        &format!("{} - {site}", game.title),
        &game.description,
        &game.title,
        &format!("{} - Play Online For Free", game.category.label()),
        NavTarget::Category(game.category),
    )
}

// =============================================================================
// Page Renderers
// =============================================================================

/// Render home listing page `number` (1-based). Pagination slices the
/// catalog in exact load order; the last page may be short.
pub fn render_home_page(
    catalog: &Catalog,
    config: &SiteConfig,
    templates: &Templates,
    number: usize,
) -> RenderedPage {
    let per_page = config.games_per_page;
    let total_pages = home_page_count(catalog.games.len(), per_page);
    let start = ((number - 1) * per_page).min(catalog.games.len());
    let end = (start + per_page).min(catalog.games.len());
    let page_games = &catalog.games[start..end];

    let body = html! {
        (pagination_control(number, total_pages))
        div.game-grid.featured-grid {
            @for game in page_games {
                (game_card(game, true))
            }
        }
        (pagination_control(number, total_pages))
    };
    let context = PageContext {
        depth: PageDepth::Root,
        active: NavTarget::Home,
        path: home_page_filename(number),
    };
    compose(templates, &home_bindings(config), body, context)
}

/// Render one category's index page.
///
/// Every category in the closed set gets a page whether the catalog
/// mentions it or not; the navigation sidebar links to all of them, and a
/// generated link must never point at a missing file. The statistics line
/// counts all records of the category, title-less ones included, so it can
/// exceed the number of cards.
pub fn render_category_page(
    catalog: &Catalog,
    config: &SiteConfig,
    templates: &Templates,
    category: Category,
) -> RenderedPage {
    let games: Vec<&Game> = catalog.games_in(category).collect();
    let total = catalog.total_for(category);

    let body = html! {
        @if games.is_empty() {
            p.empty-category { "No games in this category yet. Check back soon!" }
        } @else {
            div.game-grid {
                @for game in &games {
                    (game_card(game, false))
                }
            }
        }
    };
    let context = PageContext {
        depth: PageDepth::Category,
        active: NavTarget::Category(category),
        path: category.index_href(),
    };
    compose(
        templates,
        &category_bindings(config, category, total),
        body,
        context,
    )
}

/// Render one game's detail page. Description and instructions render
/// whatever the catalog holds, empty included; the play link opens the
/// outbound URL while the iframe embeds the player in place.
pub fn render_detail_page(config: &SiteConfig, templates: &Templates, game: &Game) -> RenderedPage {
    let thumb = game.thumb.as_deref().unwrap_or(PLACEHOLDER_PATH);

    let body = html! {
        div.game-detail {
            div.game-preview {
                img.game-detail-image src=(thumb) alt=(game.title);
            }
            div.game-info-detail {
                h2 { (game.title) }
                div.game-tags.detail-tags {
                    @for tag in &game.tags {
                        span { (tag) }
                    }
                }
                div.game-description {
                    h3 { "Game Description" }
                    p { (game.description) }
                }
                div.game-instructions {
                    h3 { "Instructions" }
                    p {
                        @for (i, line) in game.instructions.lines().enumerate() {
                            @if i > 0 { br; }
                            (line)
                        }
                    }
                }
                a.play-btn.detail-play href=(game.url) target="_blank" rel="noopener" {
                    "Play Now"
                }
            }
        }
        div.game-iframe {
            h3 { "Play Online" }
            div.iframe-container {
                iframe src=(game.embed_url) width="800" height="600" frameborder="0" allowfullscreen {}
            }
        }
    };
    let context = PageContext {
        depth: PageDepth::Detail,
        active: NavTarget::Category(game.category),
        path: game.detail_href(),
    };
    compose(templates, &detail_bindings(config, game), body, context)
}

// =============================================================================
// Tests
// =============================================================================
