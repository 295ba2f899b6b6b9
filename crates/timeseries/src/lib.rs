//! Mosaic TimeSeries - immutable date-indexed series of decimal values.
//!
//! A [`TimeSeries`] holds observations keyed by calendar date, sorted in
//! ascending date order with at most one value per date. Series are built
//! once through [`TimeSeriesBuilder`] and never mutated afterwards, so they
//! can be shared freely across snapshot copies.

pub mod series;

pub use series::{TimeSeries, TimeSeriesBuilder};
