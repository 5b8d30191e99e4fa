//! Newsclip Sync Library
//!
//! Incremental transfer of news-item rows from a source sheet into a
//! date-bucketed destination sheet. Each run selects rows whose posted
//! timestamp falls inside a rolling 24-hour window (15:00:00 of the previous
//! day through 14:59:59 of the run day, UTC+9), drops rows already present
//! in the destination bucket (keyed by URL), and appends the remainder in
//! the fixed 12-column destination layout.
//!
//! # Components
//!
//! - [`window`]: derives the destination bucket id and the inclusive time
//!   bounds from the run instant
//! - [`timestamp`]: normalizes the two known posted-at encodings into a
//!   single comparable instant
//! - [`record`]: decodes raw source rows into [`record::SourceRecord`]s,
//!   tagging undecodable rows instead of failing the run
//! - [`dedup`]: recovers seen-URL state and header presence from prior
//!   destination output
//! - [`materialize`]: shapes accepted records into destination rows
//! - [`pipeline`]: drives the linear sync (ensure bucket, load state,
//!   filter, materialize, write)
//! - [`storage`]: the range-store seam plus the Google Sheets and
//!   in-memory backends
//!
//! # Example
//!
//! ```no_run
//! use newsclip_sync::config::SyncConfig;
//! use newsclip_sync::pipeline::SyncPipeline;
//! use newsclip_sync::storage::MemoryStore;
//! use newsclip_sync::timestamp::jst;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = MemoryStore::new();
//!     let config = SyncConfig::default();
//!     let pipeline = SyncPipeline::new(store.clone(), store, config);
//!     let now = chrono::Utc::now().with_timezone(&jst());
//!     let report = pipeline.run(now).await?;
//!     tracing::info!(appended = report.appended, "sync finished");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dedup;
pub mod materialize;
pub mod pipeline;
pub mod record;
pub mod storage;
pub mod timestamp;
pub mod window;
