//! Shared page shell and `{{key}}` placeholder substitution.
//!
//! Every page is assembled as `header + body + footer`. The header and
//! footer are plain HTML fragments carrying `{{name}}` placeholders; the
//! header ends with an open content section that the footer closes, so the
//! per-page body slots between them.
//!
//! ## Substitution Semantics
//!
//! Substitution is literal and single-pass:
//! - `{{key}}` is replaced when `key` is bound; otherwise it stays in the
//!   output verbatim.
//! - Replacement values are never re-scanned, so a value containing
//!   `{{anything}}` cannot trigger further substitution and rendering
//!   always terminates.
//! - Rendering never fails.
//!
//! ## Standard Bindings
//!
//! Every page binds `site_name`, `title`, `description`, `header`,
//! `subheader`, plus one active-marker key per navigation entry
//! (`home_active` and one `<category>_active` per category). Exactly one
//! marker carries `"active"`; the rest are empty. [`standard_bindings`]
//! builds the full set so no renderer can forget a marker.
//!
//! ## Template Sources
//!
//! `<source>/templates/header.html` and `footer.html` override the stock
//! copies compiled into the binary. A present-but-unreadable override is
//! reported and the stock copy used; template problems never abort a build.

use crate::catalog::Category;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Stock page shell, used when the source directory supplies no override.
pub const STOCK_HEADER: &str = include_str!("../static/header.html");
pub const STOCK_FOOTER: &str = include_str!("../static/footer.html");

/// Marker value bound to the active navigation entry's placeholder.
pub const ACTIVE_MARKER: &str = "active";

/// Placeholder values for one page render.
pub type Bindings = BTreeMap<String, String>;

/// Which navigation entry is highlighted on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    Home,
    Category(Category),
}

impl NavTarget {
    /// The category this page belongs to, if any.
    pub fn category(self) -> Option<Category> {
        match self {
            NavTarget::Home => None,
            NavTarget::Category(category) => Some(category),
        }
    }
}

/// Substitute `{{key}}` placeholders in a template fragment.
///
/// Single left-to-right pass. Unknown keys are left as literal `{{key}}`
/// text; replacement values are emitted without being re-scanned.
pub fn render(template: &str, bindings: &Bindings) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) if bindings.contains_key(&after[..end]) => {
                out.push_str(&bindings[&after[..end]]);
                rest = &after[end + 2..];
            }
            Some(_) => {
                // Unknown key: keep the braces, rescan from the key text so
                // a later `{{` inside it still gets its chance.
                out.push_str("{{");
                rest = after;
            }
            None => {
                // No closing braces anywhere; the rest is literal.
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Escape text for interpolation into HTML attribute values.
///
/// Covers the same four characters maud escapes in its output. Body markup
/// goes through maud and does not need this; it exists for catalog-derived
/// strings bound into the raw header template.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}

/// Build the full standard binding set for one page.
///
/// `title` and `description` land in `<head>` metadata, `header` and
/// `subheader` in the visible page heading, `site_name` in the logo and
/// footer lines. The active target decides which single navigation marker
/// binds [`ACTIVE_MARKER`]; every other marker binds empty so no
/// `{{…_active}}` survives in the output.
pub fn standard_bindings(
    site_name: &str,
    title: &str,
    description: &str,
    header: &str,
    subheader: &str,
    active: NavTarget,
) -> Bindings {
    let mut bindings = Bindings::new();
    bindings.insert("site_name".to_string(), escape_html(site_name));
    bindings.insert("title".to_string(), escape_html(title));
    bindings.insert("description".to_string(), escape_html(description));
    bindings.insert("header".to_string(), escape_html(header));
    bindings.insert("subheader".to_string(), escape_html(subheader));

    let marker = |on: bool| if on { ACTIVE_MARKER } else { "" }.to_string();
    bindings.insert("home_active".to_string(), marker(active == NavTarget::Home));
    for category in Category::ALL {
        bindings.insert(
            category.active_key().to_string(),
            marker(active == NavTarget::Category(category)),
        );
    }
    bindings
}

/// The long-lived page shell, loaded once per run and shared read-only by
/// every renderer.
#[derive(Debug, Clone)]
pub struct Templates {
    pub header: String,
    pub footer: String,
}

impl Templates {
    /// The compiled-in stock shell.
    pub fn stock() -> Templates {
        Templates {
            header: STOCK_HEADER.to_string(),
            footer: STOCK_FOOTER.to_string(),
        }
    }

    /// Load the shell from `<source>/templates/`, per-file falling back to
    /// the stock copy. Returns any warnings for the caller to report; an
    /// unreadable override never aborts the build.
    pub fn load(source_root: &Path) -> (Templates, Vec<String>) {
        let mut warnings = Vec::new();
        let dir = source_root.join("templates");
        let mut fragment = |name: &str, stock: &str| -> String {
            let path = dir.join(name);
            if !path.is_file() {
                return stock.to_string();
            }
            match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(err) => {
                    warnings.push(format!(
                        "template {} unreadable ({err}); using stock copy",
                        path.display()
                    ));
                    stock.to_string()
                }
            }
        };
        let header = fragment("header.html", STOCK_HEADER);
        let footer = fragment("footer.html", STOCK_FOOTER);
        (Templates { header, footer }, warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn bind(pairs: &[(&str, &str)]) -> Bindings {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    // =========================================================================
    // render
    // =========================================================================

    #[test]
    fn single_placeholder_substituted() {
        let out = render("<h1>{{header}}</h1>", &bind(&[("header", "All Games")]));
        assert_eq!(out, "<h1>All Games</h1>");
    }

    #[test]
    fn repeated_placeholder_substituted_everywhere() {
        let out = render("{{x}} and {{x}}", &bind(&[("x", "y")]));
        assert_eq!(out, "y and y");
    }

    #[test]
    fn unknown_placeholder_left_literal() {
        let out = render("<title>{{title}}</title>", &bind(&[("header", "x")]));
        assert_eq!(out, "<title>{{title}}</title>");
    }

    #[test]
    fn rendering_unknowns_again_is_noop() {
        let bindings = bind(&[("known", "v")]);
        let once = render("{{known}} {{unknown}}", &bindings);
        let twice = render(&once, &bindings);
        assert_eq!(once, "v {{unknown}}");
        assert_eq!(once, twice);
    }

    #[test]
    fn replacement_values_not_rescanned() {
        let out = render("{{a}}", &bind(&[("a", "{{b}}"), ("b", "boom")]));
        assert_eq!(out, "{{b}}");
    }

    #[test]
    fn value_referencing_itself_terminates() {
        let out = render("{{a}}", &bind(&[("a", "{{a}}")]));
        assert_eq!(out, "{{a}}");
    }

    #[test]
    fn unclosed_braces_are_literal() {
        let out = render("tail {{open", &bind(&[("open", "x")]));
        assert_eq!(out, "tail {{open");
    }

    #[test]
    fn adjacent_placeholders() {
        let out = render("{{a}}{{b}}", &bind(&[("a", "1"), ("b", "2")]));
        assert_eq!(out, "12");
    }

    #[test]
    fn unknown_key_does_not_swallow_following_placeholder() {
        let out = render("{{nope}}{{a}}", &bind(&[("a", "1")]));
        assert_eq!(out, "{{nope}}1");
    }

    #[test]
    fn empty_template() {
        assert_eq!(render("", &bind(&[("a", "1")])), "");
    }

    #[test]
    fn template_without_placeholders_unchanged() {
        let html = "<p>plain</p>";
        assert_eq!(render(html, &Bindings::new()), html);
    }

    #[test]
    fn key_with_spaces_is_not_the_same_key() {
        let out = render("{{ title }}", &bind(&[("title", "x")]));
        assert_eq!(out, "{{ title }}");
    }

    // =========================================================================
    // escape_html
    // =========================================================================

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html(r#"<b>"fish" & chips</b>"#),
            "&lt;b&gt;&quot;fish&quot; &amp; chips&lt;/b&gt;"
        );
    }

    #[test]
    fn plain_text_unchanged() {
        assert_eq!(escape_html("Sniper: Elite 3"), "Sniper: Elite 3");
    }

    // =========================================================================
    // standard_bindings
    // =========================================================================

    #[test]
    fn exactly_one_active_marker() {
        let bindings =
            standard_bindings("Arcade", "t", "d", "h", "s", NavTarget::Category(Category::Racing));
        let active: Vec<&str> = bindings
            .iter()
            .filter(|(k, v)| k.ends_with("_active") && *v == ACTIVE_MARKER)
            .map(|(k, _)| k.as_str())
            .collect();
        assert_eq!(active, ["racing_active"]);
    }

    #[test]
    fn home_target_activates_home_marker() {
        let bindings = standard_bindings("Arcade", "t", "d", "h", "s", NavTarget::Home);
        assert_eq!(bindings["home_active"], ACTIVE_MARKER);
        assert_eq!(bindings["action_active"], "");
    }

    #[test]
    fn io_marker_key_has_no_dot() {
        let bindings =
            standard_bindings("Arcade", "t", "d", "h", "s", NavTarget::Category(Category::Io));
        assert_eq!(bindings["io_active"], ACTIVE_MARKER);
        assert!(!bindings.contains_key(".io_active"));
    }

    #[test]
    fn every_marker_bound_even_when_inactive() {
        let bindings = standard_bindings("Arcade", "t", "d", "h", "s", NavTarget::Home);
        for category in Category::ALL {
            assert!(bindings.contains_key(category.active_key()));
        }
    }

    #[test]
    fn catalog_text_is_escaped() {
        let bindings =
            standard_bindings("Arcade", r#"Say "hi" & <run>"#, "d", "h", "s", NavTarget::Home);
        assert_eq!(bindings["title"], "Say &quot;hi&quot; &amp; &lt;run&gt;");
    }

    #[test]
    fn stock_header_renders_without_leftover_active_markers() {
        let bindings = standard_bindings("Arcade", "T", "D", "H", "S", NavTarget::Home);
        let html = render(STOCK_HEADER, &bindings);
        assert!(!html.contains("_active}}"));
        assert!(!html.contains("{{site_name}}"));
        assert!(html.contains("<title>T</title>"));
        assert!(html.contains("Arcade"));
    }

    // =========================================================================
    // Templates::load
    // =========================================================================

    #[test]
    fn stock_used_when_no_templates_dir() {
        let tmp = TempDir::new().unwrap();
        let (templates, warnings) = Templates::load(tmp.path());
        assert_eq!(templates.header, STOCK_HEADER);
        assert_eq!(templates.footer, STOCK_FOOTER);
        assert!(warnings.is_empty());
    }

    #[test]
    fn user_header_overrides_stock_footer_stays_stock() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("templates");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("header.html"), "<custom>{{title}}").unwrap();

        let (templates, warnings) = Templates::load(tmp.path());
        assert_eq!(templates.header, "<custom>{{title}}");
        assert_eq!(templates.footer, STOCK_FOOTER);
        assert!(warnings.is_empty());
    }

    #[test]
    fn stock_shell_closes_what_it_opens() {
        // The header opens the document, sidebar, and content section; the
        // footer must close them in order.
        assert!(STOCK_HEADER.contains("<section class=\"content\">"));
        assert!(STOCK_FOOTER.contains("</section>"));
        assert!(STOCK_FOOTER.contains("</body>"));
        assert!(STOCK_FOOTER.contains("</html>"));
    }
}
