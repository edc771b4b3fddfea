//! Report export.
//!
//! Analyses hand plain summary records to a [`ReportSink`]; the sink decides
//! where they go. Payloads are built in [`charts`] with display rounding
//! applied there and nowhere earlier.

pub mod charts;
mod json_writer;

pub use charts::{
    CalibrationChart, ConcentrationChart, MakerTakerChart, MonteCarloChart, OverviewChart, round_dp,
};
pub use json_writer::JsonChartWriter;

use crate::error::DataError;
use serde::Serialize;

/// Destination for named report payloads.
pub trait ReportSink {
    /// Publishes one report under `name`.
    fn publish(&self, name: &str, payload: serde_json::Value) -> Result<(), DataError>;
}

/// Serializes `chart` and publishes it to `sink`.
///
/// # Errors
/// Fails if the chart cannot be serialized or the sink rejects it.
pub fn publish_chart<S, T>(sink: &S, name: &str, chart: &T) -> Result<(), DataError>
where
    S: ReportSink + ?Sized,
    T: Serialize,
{
    let payload = serde_json::to_value(chart).map_err(|source| DataError::Serialize {
        name: name.to_string(),
        source,
    })?;
    sink.publish(name, payload)
}
