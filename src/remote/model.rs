use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::prompb;

/// A name/value pair attached to a time series. The metric name itself
/// travels as a label named `__name__`; that is a caller convention and
/// nothing here enforces it or de-duplicates repeated names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    pub value: String,
}

/// A single value reported at a given time.
///
/// The wire format carries timestamps at second resolution, so any
/// sub-second part of the timestamp is dropped during encoding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Datapoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// One time series to write: a label set and a single datapoint.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeSeries {
    pub labels: Vec<Label>,
    pub datapoint: Datapoint,
}

/// A list of time series, sent together in one write request.
pub type TsList = Vec<TimeSeries>;

/// Converts a list of time series to a remote write protobuf request.
///
/// Labels are copied in order, values verbatim (NaN and infinities pass
/// through untouched, as the protocol's stale markers require), and the
/// timestamp becomes floor-truncated unix seconds. An empty list yields
/// a well-formed request with no series.
pub fn to_write_request(series_list: &[TimeSeries]) -> prompb::WriteRequest {
    let timeseries = series_list
        .iter()
        .map(|series| {
            let labels = series
                .labels
                .iter()
                .map(|label| prompb::Label {
                    name: label.name.clone().into_bytes(),
                    value: label.value.clone().into_bytes(),
                })
                .collect();

            let sample = prompb::Sample {
                value: series.datapoint.value,
                timestamp: series.datapoint.timestamp.timestamp(),
            };

            prompb::TimeSeries {
                labels,
                samples: vec![sample],
            }
        })
        .collect();

    prompb::WriteRequest { timeseries }
}
