//! Round-based assembly of market data.
//!
//! The entry point is [`MarketDataEngine`]: it takes a set of
//! requirements and a base snapshot and resolves everything the
//! requirements name, fetching observables from the sources and running
//! the registered builders for derived data. Builders declare their own
//! requirements, and the engine keeps scheduling rounds until the whole
//! dependency graph is either resolved or failed.

mod boundary;
mod market_data_engine;
mod run;


pub use market_data_engine::MarketDataEngine;
