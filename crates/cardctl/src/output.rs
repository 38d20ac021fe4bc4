//! Output rendering for cardctl
//!
//! Renderers produce plain text with `[SECTION]` headers; `colorize` adds
//! terminal styling on top for interactive use.

use owo_colors::OwoColorize;
use person_card::{CardEnvelope, ImageReport, RejectReason, SearchDiagnostics};
use std::io::IsTerminal;

/// Pretty JSON for the `{"action": ...}` envelope
pub fn render_envelope(envelope: &CardEnvelope) -> serde_json::Result<String> {
    serde_json::to_string_pretty(envelope)
}

pub fn render_rejection(query: &str, reason: &RejectReason) -> String {
    format!("Rejected '{}': {}", query, reason)
}

fn field(out: &mut String, label: &str, value: Option<&str>) {
    out.push_str(&format!("  {:<9} {}\n", format!("{}:", label), value.unwrap_or("-")));
}

pub fn render_diagnostics(d: &SearchDiagnostics) -> String {
    let mut out = String::from("[REQUEST]\n");
    field(&mut out, "Endpoint", Some(&d.endpoint));
    for (key, value) in &d.params {
        field(&mut out, key, Some(value));
    }

    out.push_str("\n[RESPONSE]\n");
    field(&mut out, "Status", Some(&d.status.to_string()));

    if let Some(body) = &d.error_body {
        field(&mut out, "Error", Some(body.trim()));
        return out;
    }

    field(&mut out, "Results", Some(&d.result_count.to_string()));

    match &d.first_hit {
        Some(hit) => {
            out.push_str("\n[FIRST RESULT]\n");
            field(&mut out, "Keys", Some(&d.first_keys.join(", ")));
            field(&mut out, "Title", hit.title.as_deref());
            field(&mut out, "Content", hit.content.as_deref());
            field(&mut out, "Snippet", hit.snippet.as_deref());
            field(&mut out, "URL", hit.url.as_deref());
            field(&mut out, "Image", hit.img_src.as_deref().or(hit.thumbnail.as_deref()));
        }
        None => out.push_str("  No results found in 'results' list.\n"),
    }

    out
}

pub fn render_image_report(r: &ImageReport) -> String {
    let mut out = String::from("[IMAGE]\n");
    field(&mut out, "URL", Some(&r.url));
    field(&mut out, "Status", Some(&r.status.to_string()));
    field(&mut out, "Type", r.content_type.as_deref());
    field(&mut out, "Length", Some(&r.content_length.to_string()));
    field(&mut out, "Format", Some(r.format.as_str()));
    field(
        &mut out,
        "Decodable",
        Some(if r.is_decodable() { "yes" } else { "no" }),
    );
    out
}

/// Colors only for a terminal stdout with NO_COLOR unset
pub fn should_use_color() -> bool {
    color_enabled(std::env::var_os("NO_COLOR").is_some(), std::io::stdout().is_terminal())
}

pub fn color_enabled(no_color: bool, is_tty: bool) -> bool {
    !no_color && is_tty
}

/// Highlight section headers when `color` is set; plain text otherwise
pub fn colorize(text: &str, color: bool) -> String {
    if !color {
        return text.to_string();
    }

    text.lines()
        .map(|line| {
            let trimmed = line.trim();
            if trimmed.starts_with('[') && trimmed.ends_with(']') {
                line.cyan().bold().to_string()
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
