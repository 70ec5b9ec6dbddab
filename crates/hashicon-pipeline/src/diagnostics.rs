//! Pipeline diagnostics: timing and per-stage metrics.
//!
//! [`generate_with_diagnostics`] drives the [`Stage`] loop, timing each
//! transition with a caller-supplied [`Clock`] and recording the
//! [`StageMetrics`] the stage reports. Time is abstracted so the crate
//! stays free of any particular clock source.
//!
//! Durations are serialized as fractional seconds (`f64`) for JSON
//! compatibility, since `std::time::Duration` does not implement serde
//! traits.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::pipeline::{Advance, Pipeline, Stage};
use crate::types::{IdenticonConfig, IdenticonError, StagedResult};

/// Serde support for `std::time::Duration` as fractional seconds.
mod duration_serde {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize a `Duration` as fractional seconds (`f64`).
    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs_f64().serialize(serializer)
    }

    /// Deserialize a `Duration` from fractional seconds (`f64`).
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(|_| {
            serde::de::Error::custom(
                "duration seconds must be finite, non-negative, and representable as a Duration",
            )
        })
    }
}

/// A source of monotonic time.
pub trait Clock {
    /// Opaque point in time.
    type Instant;

    /// The current instant.
    fn now(&self) -> Self::Instant;

    /// Time elapsed since `since`.
    fn elapsed(&self, since: &Self::Instant) -> Duration;
}

/// Diagnostics collected from a single pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineDiagnostics {
    /// One entry per executed stage transition, in order.
    pub stages: Vec<StageDiagnostics>,
    /// Total wall-clock duration of the entire pipeline (seconds).
    #[serde(with = "duration_serde")]
    pub total_duration: Duration,
    /// Summary counts across all stages.
    pub summary: PipelineSummary,
}

/// Diagnostics for a single pipeline stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageDiagnostics {
    /// Stage name (see [`PipelineStage::NAME`](crate::pipeline::PipelineStage::NAME)).
    pub name: String,
    /// Wall-clock duration of this stage (seconds).
    #[serde(with = "duration_serde")]
    pub duration: Duration,
    /// Stage-specific metrics.
    pub metrics: StageMetrics,
}

/// Stage-specific metrics that vary by pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageMetrics {
    /// Hashing metrics.
    Hash {
        /// Algorithm name.
        algorithm: String,
        /// Length of the input in bytes.
        input_bytes: usize,
        /// Lowercase hex digest.
        digest: String,
    },
    /// Color selection metrics.
    Color {
        /// Selected color as `#rrggbb`.
        color: String,
    },
    /// Grid construction metrics.
    Grid {
        /// Number of mirrored rows.
        row_count: usize,
        /// Total cells before filtering.
        cell_count: usize,
    },
    /// Parity filter metrics.
    Filter {
        /// Cells before filtering.
        cells_before: usize,
        /// Cells that survived.
        cells_after: usize,
    },
    /// Pixel mapping metrics.
    PixelMap {
        /// Number of rectangles produced.
        rect_count: usize,
        /// Cell side length in pixels.
        cell_size: u32,
    },
    /// Rasterization and encoding metrics.
    Render {
        /// Canvas width in pixels.
        width: u32,
        /// Canvas height in pixels.
        height: u32,
        /// Background fill name.
        background: String,
        /// Size of the encoded PNG.
        png_bytes: usize,
    },
}

/// High-level summary for the entire pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSummary {
    /// The input string.
    pub input: String,
    /// Fill color as `#rrggbb`.
    pub color: String,
    /// Cells drawn.
    pub filled_cells: usize,
    /// Cells in the unfiltered grid.
    pub total_cells: usize,
    /// Size of the encoded PNG.
    pub png_bytes: usize,
}

/// Run the pipeline, collecting timing and metrics for every stage.
///
/// # Errors
///
/// Returns [`IdenticonError`] if any stage fails.
pub fn generate_with_diagnostics<C: Clock>(
    input: &str,
    config: &IdenticonConfig,
    clock: &C,
) -> Result<(StagedResult, PipelineDiagnostics), IdenticonError> {
    let run_start = clock.now();
    let mut stages = Vec::new();
    let mut stage: Stage = Pipeline::new(input, config.clone()).into();

    loop {
        let stage_start = clock.now();
        match stage.advance()? {
            Advance::Next(next) => {
                let duration = clock.elapsed(&stage_start);
                if let Some(metrics) = next.metrics() {
                    stages.push(StageDiagnostics {
                        name: next.name().to_owned(),
                        duration,
                        metrics,
                    });
                }
                stage = next;
            }
            Advance::Complete(done) => {
                stage = done;
                break;
            }
        }
    }

    let result = stage.complete()?;
    let total_duration = clock.elapsed(&run_start);
    let summary = PipelineSummary {
        input: result.input.clone(),
        color: result.color.to_string(),
        filled_cells: result.filtered.len(),
        total_cells: result.grid.len(),
        png_bytes: result.png.len(),
    };

    Ok((
        result,
        PipelineDiagnostics {
            stages,
            total_duration,
            summary,
        },
    ))
}

impl PipelineDiagnostics {
    /// Format diagnostics as a human-readable report.
    #[must_use]
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Identicon Diagnostics Report\n{}", "=".repeat(60)));
        lines.push(format!("Input: {:?}", self.summary.input));
        lines.push(format!(
            "Total duration: {:.3}ms",
            duration_ms(self.total_duration),
        ));
        lines.push(String::new());

        lines.push(format!(
            "{:<16} {:>10} {:>10}  {}",
            "Stage", "Duration", "% Total", "Details"
        ));
        lines.push("-".repeat(72));

        let total_ms = duration_ms(self.total_duration);
        for stage in &self.stages {
            let ms = duration_ms(stage.duration);
            let pct = if total_ms > 0.0 {
                ms / total_ms * 100.0
            } else {
                0.0
            };
            let details = format_metrics(&stage.metrics);
            lines.push(format!(
                "{:<16} {ms:>8.3}ms {pct:>9.1}%  {details}",
                stage.name
            ));
        }

        lines.push(String::new());
        lines.push(format!(
            "Color: {}  |  Filled cells: {}/{}  |  PNG: {} bytes",
            self.summary.color,
            self.summary.filled_cells,
            self.summary.total_cells,
            self.summary.png_bytes,
        ));

        lines.join("\n")
    }
}

/// Convert a `Duration` to milliseconds as `f64`.
fn duration_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

/// Format stage metrics into a compact detail string.
fn format_metrics(metrics: &StageMetrics) -> String {
    match metrics {
        StageMetrics::Hash {
            algorithm,
            input_bytes,
            digest,
        } => format!("{algorithm}: {input_bytes} bytes -> {digest}"),
        StageMetrics::Color { color } => color.clone(),
        StageMetrics::Grid {
            row_count,
            cell_count,
        } => format!("{row_count} rows, {cell_count} cells"),
        StageMetrics::Filter {
            cells_before,
            cells_after,
        } => format!("{cells_before} -> {cells_after} cells"),
        StageMetrics::PixelMap {
            rect_count,
            cell_size,
        } => format!("{rect_count} rects of {cell_size}px"),
        StageMetrics::Render {
            width,
            height,
            background,
            png_bytes,
        } => format!("{width}x{height} on {background}, {png_bytes} bytes"),
    }
}
