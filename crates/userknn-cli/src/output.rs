//! Rendering of recommendation results.

use std::io::Write;

use anyhow::Context;
use serde::Serialize;
use userknn_core::{NeighborWeights, RecommendationList};

use crate::config::OutputFormat;

/// Everything a single run prints.
#[derive(Debug, Serialize)]
struct Report<'a> {
    neighbors: &'a NeighborWeights,
    recommendations: &'a RecommendationList,
}

/// Writes the recommendations, and optionally the neighbor weights, in the
/// requested format.
///
/// JSON output is a bare array of recommendations unless neighbors are
/// included, in which case both are wrapped in one object.
pub fn render(
    out: &mut impl Write,
    format: OutputFormat,
    list: &RecommendationList,
    neighbors: Option<&NeighborWeights>,
) -> anyhow::Result<()> {
    let written = match format {
        OutputFormat::Text => render_text(out, list, neighbors),
        OutputFormat::Json => render_json(out, list, neighbors),
    };

    written.context("failed to write output")
}

fn render_text(
    out: &mut impl Write,
    list: &RecommendationList,
    neighbors: Option<&NeighborWeights>,
) -> anyhow::Result<()> {
    if let Some(neighbors) = neighbors {
        writeln!(out, "# neighbors")?;
        for (user, weight) in neighbors.iter() {
            writeln!(out, "{user}\t{weight:.4}")?;
        }
        writeln!(out, "# recommendations")?;
    }

    for recommendation in list {
        writeln!(
            out,
            "{}\t{:.2}",
            recommendation.item_id, recommendation.predicted_rating
        )?;
    }

    Ok(())
}

fn render_json(
    out: &mut impl Write,
    list: &RecommendationList,
    neighbors: Option<&NeighborWeights>,
) -> anyhow::Result<()> {
    match neighbors {
        Some(neighbors) => serde_json::to_writer_pretty(
            &mut *out,
            &Report {
                neighbors,
                recommendations: list,
            },
        )?,
        None => serde_json::to_writer_pretty(&mut *out, list)?,
    }

    writeln!(out)?;
    Ok(())
}
