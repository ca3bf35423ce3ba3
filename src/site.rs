//! Build pipeline.
//!
//! Orchestrates one site build: install assets, plan every page, render and
//! write the pages in parallel, and account for everything that happened.
//! The pipeline never aborts midway; per-page problems land in the report
//! and the run carries on.
//!
//! ```text
//! catalog ─┬─ home pages (1..=ceil(N/page size))─┐
//!          ├─ category indexes (all twelve)      ├─ render → resolve → write
//!          └─ detail pages (one per game)       ─┘      (rayon par_iter)
//! ```
//!
//! Pages are independent by construction: every worker reads the shared
//! catalog, config, and templates, and no two pages share an output path.
//! The only synchronization is the join at the end of the parallel loop.

use std::path::Path;
use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::catalog::{Catalog, Category, Game};
use crate::config::SiteConfig;
use crate::paths::{self, PageDepth};
use crate::render::{self, RenderedPage};
use crate::template::Templates;
use crate::write::{self, AssetReport};

/// One planned page. The plan is fully determined by the catalog and the
/// page size before any rendering starts.
enum PagePlan<'a> {
    Home(usize),
    Category(Category),
    Detail(&'a Game),
}

/// A page whose final HTML still contains references the resolver does not
/// recognize. Reported, never fatal.
#[derive(Debug)]
pub struct UnresolvedPage {
    pub path: String,
    pub references: Vec<String>,
}

/// A page that could not be written. Sibling pages are unaffected.
#[derive(Debug)]
pub struct WriteFailure {
    pub path: String,
    pub error: String,
}

/// Everything one build run did, consumed by the final summary.
#[derive(Debug)]
pub struct BuildReport {
    pub home_pages: usize,
    pub category_pages: usize,
    pub detail_pages: usize,
    /// Pages that actually reached disk.
    pub pages_written: usize,
    pub assets: AssetReport,
    pub asset_error: Option<String>,
    pub unresolved: Vec<UnresolvedPage>,
    pub write_failures: Vec<WriteFailure>,
    pub elapsed: Duration,
}

impl BuildReport {
    /// Total pages the plan called for.
    pub fn pages_planned(&self) -> usize {
        self.home_pages + self.category_pages + self.detail_pages
    }
}

struct PageOutcome {
    path: String,
    depth: PageDepth,
    unresolved: Vec<String>,
    error: Option<String>,
}

/// Number of pages one build of this catalog will produce.
pub fn pages_planned(catalog: &Catalog, config: &SiteConfig) -> usize {
    render::home_page_count(catalog.games.len(), config.games_per_page)
        + Category::ALL.len()
        + catalog.games.len()
}

/// Run one full build into `output_root`.
///
/// Infallible by design: the catalog is the caller's to load (and the only
/// fatal input), everything in here degrades into report entries instead of
/// errors.
pub fn build(
    catalog: &Catalog,
    config: &SiteConfig,
    templates: &Templates,
    source_root: &Path,
    output_root: &Path,
) -> BuildReport {
    let started = Instant::now();

    let (assets, asset_error) = match write::install_assets(source_root, output_root) {
        Ok(report) => (report, None),
        Err(err) => (AssetReport::default(), Some(err.to_string())),
    };

    let home_pages = render::home_page_count(catalog.games.len(), config.games_per_page);
    let mut plans: Vec<PagePlan> = Vec::with_capacity(pages_planned(catalog, config));
    plans.extend((1..=home_pages).map(PagePlan::Home));
    plans.extend(Category::ALL.iter().copied().map(PagePlan::Category));
    plans.extend(catalog.games.iter().map(PagePlan::Detail));

    let outcomes: Vec<PageOutcome> = plans
        .par_iter()
        .map(|plan| {
            let page = render_plan(plan, catalog, config, templates);
            finish_page(page, output_root)
        })
        .collect();

    let mut report = BuildReport {
        home_pages: 0,
        category_pages: 0,
        detail_pages: 0,
        pages_written: 0,
        assets,
        asset_error,
        unresolved: Vec::new(),
        write_failures: Vec::new(),
        elapsed: Duration::ZERO,
    };
    for outcome in outcomes {
        match outcome.depth {
            PageDepth::Root => report.home_pages += 1,
            PageDepth::Category => report.category_pages += 1,
            PageDepth::Detail => report.detail_pages += 1,
        }
        if !outcome.unresolved.is_empty() {
            report.unresolved.push(UnresolvedPage {
                path: outcome.path.clone(),
                references: outcome.unresolved,
            });
        }
        match outcome.error {
            None => report.pages_written += 1,
            Some(error) => report.write_failures.push(WriteFailure {
                path: outcome.path,
                error,
            }),
        }
    }
    report.elapsed = started.elapsed();
    report
}

fn render_plan(
    plan: &PagePlan<'_>,
    catalog: &Catalog,
    config: &SiteConfig,
    templates: &Templates,
) -> RenderedPage {
    match plan {
        PagePlan::Home(number) => render::render_home_page(catalog, config, templates, *number),
        PagePlan::Category(category) => {
            render::render_category_page(catalog, config, templates, *category)
        }
        PagePlan::Detail(game) => render::render_detail_page(config, templates, game),
    }
}

/// Audit a rendered page for unresolved references and put it on disk.
fn finish_page(page: RenderedPage, output_root: &Path) -> PageOutcome {
    let unresolved = paths::unresolved_references(&page.html);
    let error = write::write_page(output_root, &page.context.path, &page.html)
        .err()
        .map(|e| e.to_string());
    PageOutcome {
        path: page.context.path,
        depth: page.context.depth,
        unresolved,
        error,
    }
}
