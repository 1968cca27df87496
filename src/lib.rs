//! Client library for pushing time series samples to a Prometheus
//! remote write endpoint, such as the one exposed by m3coordinator.

pub mod remote;
