//! Typo-tolerant lookup of free-text queries against fixed catalogs of
//! canonical names.
//!
//! A [`catalog::Catalog`] answers a query from its exact synonym map first
//! and falls back to one of two [`suggester`] strategies: a linear
//! edit-distance scan, or a precomputed substring/typo index. The
//! [`policy`] module turns the ranked candidates into a decision.

pub mod catalog;
pub mod config;
pub mod handlers;
pub mod http;
pub mod importer;
pub mod init;
pub mod manager;
pub mod models;
pub mod policy;
pub mod suggester;
