//! Optional hit/miss and policy-specific counters (feature `metrics`).
//!
//! Policies hold a recorder from [`metrics_impl`] and bump it inline; callers
//! read a [`snapshot`] through [`traits::MetricsSnapshotProvider`].

pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
