//! Record store implementations.

#[cfg(test)]
mod mock;
mod postgres;

#[cfg(test)]
pub use mock::{recording_fixture, MockFetchFailure, MockRecordingStore};
pub use postgres::PgRecordingStore;
