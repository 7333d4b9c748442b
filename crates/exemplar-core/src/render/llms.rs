//! Flat Markdown export for language models (`llms.txt`).

use crate::config::SiteConfig;
use crate::dataset::Dataset;
use crate::example::ExampleRecord;
use std::fmt::Write as _;

/// Render the whole corpus as one Markdown document.
///
/// Sections become `##` headings and examples `###` headings. Each example
/// carries its description, full source in a fenced block, and any shell
/// interactions.
#[must_use]
pub fn render_llms_txt(dataset: &Dataset, config: &SiteConfig) -> String {
    let language = config.source.extensions.first().map_or("", String::as_str);
    let mut out = String::new();

    let _ = writeln!(out, "# {}\n", config.site.title);
    if !config.site.description.is_empty() {
        let _ = writeln!(out, "> {}\n", config.site.description);
    }

    for group in dataset.sections_with_examples() {
        if let Some(section) = group.section {
            let _ = writeln!(out, "## {}\n", section.title);
            if !section.description.is_empty() {
                let _ = writeln!(out, "{}\n", section.description);
            }
        }
        for example in group.examples {
            write_example(&mut out, example, language);
        }
    }

    let trimmed = out.trim_end().len();
    out.truncate(trimmed);
    out.push('\n');
    out
}

fn write_example(out: &mut String, example: &ExampleRecord, language: &str) {
    let _ = writeln!(out, "### {}\n", example.title);
    if !example.description.is_empty() {
        let _ = writeln!(out, "{}\n", example.description);
    }

    let source: String = example.code_segments.iter().map(|s| s.raw.as_str()).collect();
    let source = source.trim_matches('\n');
    if !source.is_empty() {
        let _ = writeln!(out, "```{language}\n{source}\n```\n");
    }

    if !example.shell_segments.is_empty() {
        out.push_str("```shell\n");
        for pair in &example.shell_segments {
            if !pair.explanation.is_empty() {
                let _ = writeln!(out, "# {}", pair.explanation);
            }
            let _ = writeln!(out, "$ {}", pair.command);
            if !pair.output.is_empty() {
                let _ = writeln!(out, "{}", pair.output);
            }
        }
        out.push_str("```\n\n");
    }

    for link in &example.documentation_links {
        let _ = writeln!(out, "- {link}");
    }
    if !example.documentation_links.is_empty() {
        out.push('\n');
    }
}
