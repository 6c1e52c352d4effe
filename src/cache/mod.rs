//! Caching utilities for the contact list.
//!
//! This module provides a single-slot time-based cache with TTL support.

pub mod timed_cache;

pub use timed_cache::TimedCache;
