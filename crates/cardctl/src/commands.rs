//! Command implementations for cardctl
//!
//! Each command writes to the given streams and returns an exit code.

use crate::errors::*;
use crate::output;
use anyhow::{Context, Result};
use person_card::{
    probe_image, resolve, CardConfig, FallbackPolicy, LookupFailure, PersonLookup, Resolution,
    SearxClient,
};
use std::io::Write;
use tracing::debug;

/// Resolve a query and print the card envelope
pub fn lookup(
    config: &CardConfig,
    query: &str,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<i32> {
    let client = SearxClient::new(config.search.clone())?;
    lookup_with(query, &client, &config.fallback, out, err)
}

pub fn lookup_with(
    query: &str,
    lookup: &dyn PersonLookup,
    policy: &FallbackPolicy,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<i32> {
    let resolution = resolve(query, lookup, policy);

    if let Resolution::Rejected(reason) = &resolution {
        writeln!(err, "{}", output::render_rejection(query, reason))?;
        return Ok(EXIT_QUERY_REJECTED);
    }

    if let Resolution::Fallback { cause, .. } = &resolution {
        debug!(failure = cause.failure().as_str(), "Printing fallback card");
    }

    if let Some(envelope) = resolution.into_envelope() {
        let json = output::render_envelope(&envelope).context("Failed to serialize card")?;
        writeln!(out, "{}", json)?;
    }

    Ok(EXIT_SUCCESS)
}

/// Run the search debug probe
pub fn search(
    config: &CardConfig,
    query: &str,
    color: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<i32> {
    let client = SearxClient::new(config.search.clone())?;

    match client.diagnose(query) {
        Ok(diagnostics) => {
            writeln!(out, "{}", output::colorize(&output::render_diagnostics(&diagnostics), color))?;
            if diagnostics.error_body.is_some() {
                Ok(EXIT_GENERAL_ERROR)
            } else {
                Ok(EXIT_SUCCESS)
            }
        }
        Err(e) => {
            writeln!(err, "Search failed: {}", e)?;
            match e.failure() {
                LookupFailure::Transport | LookupFailure::Unavailable => Ok(EXIT_BACKEND_UNAVAILABLE),
                _ => Ok(EXIT_GENERAL_ERROR),
            }
        }
    }
}

/// Download an image and report whether it is usable
pub fn image(
    config: &CardConfig,
    url: &str,
    color: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<i32> {
    match probe_image(url, &config.image) {
        Ok(report) => {
            writeln!(out, "{}", output::colorize(&output::render_image_report(&report), color))?;
            if report.is_decodable() {
                Ok(EXIT_SUCCESS)
            } else {
                Ok(EXIT_GENERAL_ERROR)
            }
        }
        Err(e) => {
            writeln!(err, "Image download failed: {}", e)?;
            Ok(EXIT_BACKEND_UNAVAILABLE)
        }
    }
}

/// Print the effective configuration
pub fn show_config(config: &CardConfig, out: &mut dyn Write) -> Result<i32> {
    write!(out, "{}", config.to_toml()?)?;
    Ok(EXIT_SUCCESS)
}
