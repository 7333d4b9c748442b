//! HTML pages built with `maud`.

use super::LinkStyle;
use super::layout::page_groups;
use crate::config::SiteSettings;
use crate::dataset::Dataset;
use crate::example::ExampleRecord;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use regex::Regex;
use std::sync::LazyLock;

static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| {
    // The pattern is a literal; failure here is a programming error.
    #[allow(clippy::expect_used)]
    Regex::new(r"`([^`\n]+)`").expect("valid inline code pattern")
});

const STYLESHEET: &str = r"
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif; line-height: 1.5; color: #222; margin: 0; }
.container { max-width: 1200px; margin: 0 auto; padding: 0 20px; }
header { border-bottom: 1px solid #eee; padding: 15px 0; margin-bottom: 20px; }
.site-title { text-decoration: none; color: #375EAB; font-weight: 500; font-size: 20px; }
footer { border-top: 1px solid #eee; padding: 15px 0; margin-top: 20px; color: #666; font-size: 0.9em; }
h1 { font-size: 36px; font-weight: 500; margin: 0 0 25px 0; color: #333; }
p { margin: 20px 0; color: #444; line-height: 1.6; }
a { color: #375EAB; text-decoration: none; }
a:hover { text-decoration: underline; }
.example-link { margin: 8px 0; }
.row { display: flex; width: 100%; margin-bottom: 30px; gap: 30px; }
.docs { flex: 1; min-width: 0; color: #444; line-height: 1.6; }
.docs p { margin: 0 0 10px 0; }
.code { flex: 2; min-width: 0; }
pre { margin: 0; padding: 16px; background-color: #f8f8f8; border-radius: 5px; overflow-x: auto; font-family: 'Menlo', 'Monaco', 'Consolas', monospace; }
hr { border: none; border-top: 1px solid #eee; margin: 20px 0; }
.command-prompt { color: #888; }
.command-text { font-weight: bold; }
figure { margin: 20px 0; }
figure img { max-width: 100%; }
.next { margin-top: 30px; font-weight: 500; padding-top: 15px; border-top: 1px solid #eee; }
.code { position: relative; }
.copy-button { position: absolute; top: 8px; right: 8px; font-size: 12px; padding: 2px 8px; border: 1px solid #ddd; border-radius: 3px; background: #fff; color: #666; cursor: pointer; }
.tooltip { position: absolute; top: 8px; right: 64px; font-size: 12px; color: #375EAB; }
@media (max-width: 768px) { .row { flex-direction: column; } }
";

const SCRIPT: &str = r"
function showTooltip(button, message) {
    const old = button.parentElement.querySelector('.tooltip');
    if (old) { old.remove(); }
    const tooltip = document.createElement('span');
    tooltip.textContent = message;
    tooltip.className = 'tooltip';
    button.parentElement.appendChild(tooltip);
    setTimeout(() => tooltip.remove(), 1000);
}
function copyCode(button) {
    const code = button.closest('.code').querySelector('pre').textContent;
    if (!navigator.clipboard) {
        showTooltip(button, 'Error!');
        return;
    }
    navigator.clipboard.writeText(code)
        .then(() => showTooltip(button, 'Copied!'))
        .catch(() => showTooltip(button, 'Error!'));
}
document.addEventListener('keydown', (e) => {
    if (e.ctrlKey || e.altKey || e.shiftKey || e.metaKey) { return; }
    if (e.key === 'ArrowRight') {
        const next = document.querySelector('.next a');
        if (next) { window.location.href = next.getAttribute('href'); }
    }
});
";

/// Render annotation prose as HTML.
///
/// The text is escaped, `` `spans` `` become `<code>`, and blank lines
/// separate paragraphs.
#[must_use]
pub fn annotation_html(text: &str) -> Markup {
    let mut out = String::new();
    for paragraph in paragraphs(text) {
        let escaped = html_escape::encode_text(&paragraph);
        let marked = INLINE_CODE.replace_all(&escaped, "<code>$1</code>");
        out.push_str("<p>");
        out.push_str(&marked);
        out.push_str("</p>");
    }
    PreEscaped(out)
}

fn paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line.trim());
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }
    paragraphs
}

/// Renders index, example, and not-found pages.
#[derive(Debug, Clone, Copy)]
pub struct PageRenderer<'a> {
    site: &'a SiteSettings,
    links: LinkStyle,
}

impl<'a> PageRenderer<'a> {
    /// Create a renderer for the given site and link style.
    #[must_use]
    pub const fn new(site: &'a SiteSettings, links: LinkStyle) -> Self {
        Self { site, links }
    }

    /// The index page listing every example, grouped by section.
    #[must_use]
    pub fn index(&self, dataset: &Dataset) -> String {
        let body = html! {
            h1 { (self.site.title) }
            @if !self.site.intro.is_empty() {
                p { (self.site.intro) }
            }
            @if let Some(first) = dataset.examples.first() {
                p {
                    "Check out the "
                    a href=(self.links.example(&first.id, 0)) { "first example" }
                    " or browse the full list below."
                }
            }
            @for group in dataset.sections_with_examples() {
                @if let Some(section) = group.section {
                    h2 { (section.title) }
                    @if !section.description.is_empty() {
                        p { (section.description) }
                    }
                }
                div.examples {
                    @for example in &group.examples {
                        div.example-link {
                            a href=(self.links.example(&example.id, 0)) { (example.title) }
                        }
                    }
                }
            }
        };
        self.page(&self.site.title, 0, &body).into_string()
    }

    /// The page for one example.
    #[must_use]
    pub fn example(&self, dataset: &Dataset, record: &ExampleRecord) -> String {
        let next = dataset.next_after(record.order);
        let body = html! {
            h1 { (record.title) }
            @if !record.description.is_empty() {
                div.description { (annotation_html(&record.description)) }
            }
            @for (i, group) in page_groups(&record.code_segments).iter().enumerate() {
                @if i > 0 { hr; }
                @if !group.header.is_empty() {
                    div.row.header {
                        div.docs {
                            @for text in &group.header { (annotation_html(text)) }
                        }
                    }
                }
                @for row in &group.rows {
                    div.row {
                        div.docs {
                            @for text in &row.annotations { (annotation_html(text)) }
                        }
                        div.code {
                            button.copy-button type="button" onclick="copyCode(this)" { "Copy" }
                            pre { code { (row.code) } }
                        }
                    }
                }
            }
            @if !record.shell_segments.is_empty() {
                hr;
                h2 { "Running the Example" }
                @for pair in &record.shell_segments {
                    div.row {
                        div.docs {
                            @if !pair.explanation.is_empty() {
                                p { (pair.explanation) }
                            }
                        }
                        div.code {
                            button.copy-button type="button" onclick="copyCode(this)" { "Copy" }
                            pre {
                                code {
                                    span.command-prompt { "$ " }
                                    span.command-text { (pair.command) }
                                    @if !pair.output.is_empty() {
                                        "\n" (pair.output)
                                    }
                                }
                            }
                        }
                    }
                }
            }
            @for image in &record.image_data {
                figure {
                    img src=(self.links.image(&record.id, &image.filename)) alt=(image.caption);
                    figcaption { (image.caption) }
                }
            }
            @if !record.documentation_links.is_empty() {
                h2 { "Further reading" }
                ul.links {
                    @for link in &record.documentation_links {
                        li { a href=(link) { (link) } }
                    }
                }
            }
            @if let Some(next) = next {
                p.next {
                    "Next example: "
                    a href=(self.links.example(&next.id, 1)) { (next.title) }
                }
            }
        };
        let title = format!("{} - {}", record.title, self.site.title);
        self.page(&title, 1, &body).into_string()
    }

    /// The page served for an unknown example id.
    #[must_use]
    pub fn not_found(&self, id: &str) -> String {
        let body = html! {
            h1 { "Example Not Found" }
            p { "The example '" (id) "' was not found." }
            p { a href=(self.links.home(1)) { "Back to index" } }
        };
        let title = format!("Example Not Found - {}", self.site.title);
        self.page(&title, 1, &body).into_string()
    }

    fn page(&self, title: &str, depth: usize, body: &Markup) -> Markup {
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    title { (title) }
                    meta name="description" content=(self.site.description);
                    style { (PreEscaped(STYLESHEET)) }
                }
                body {
                    div.container {
                        header {
                            a.site-title href=(self.links.home(depth)) { (self.site.title) }
                        }
                        main { (body) }
                        footer {
                            p {
                                (self.site.title)
                                @for link in &self.site.footer_links {
                                    " | "
                                    a href=(link.url) { (link.label) }
                                }
                            }
                        }
                    }
                    script { (PreEscaped(SCRIPT)) }
                }
            }
        }
    }
}
