//! when2go: pick the best time to leave.
//!
//! Geocodes a start and destination with TomTom, samples departure times
//! across a window and reports the quickest one, with a map, traffic
//! summaries and a CSV history of past lookups. Ships as a web dashboard
//! and a terminal client.

pub mod cache;
pub mod cli;
pub mod config;
pub mod domain;
pub mod history;
pub mod planner;
pub mod render;
pub mod tomtom;
pub mod web;
