//! Per-instance cache counters (feature `metrics`).
//!
//! Recording, snapshotting and export are split into separate traits so
//! policy code only ever writes counters:
//!
//! ```text
//!   LruCache / LfuCache ──record_*──► CacheMetrics
//!                                          │
//!                         MetricsSnapshotProvider::snapshot()
//!                                          ▼
//!                                 CacheMetricsSnapshot ──► MetricsExporter
//! ```

pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use exporter::PrometheusTextExporter;
pub use metrics_impl::CacheMetrics;
pub use snapshot::CacheMetricsSnapshot;
pub use traits::{CoreMetricsRecorder, MetricsExporter, MetricsSnapshotProvider};
