//! # Patent Constellation
//!
//! Portfolio analytics over a learned molecular embedding space.
//!
//! The crate turns a portfolio's patents into a 2D/3D "constellation" map,
//! finds dense clusters and actionable white space in it, renders a kernel
//! density heatmap, and scores a portfolio head to head against a competitor.
//!
//! ## Architecture
//!
//! - [`api`]: the `PortfolioId` newtype and re-exports of every DTO
//! - [`models`]: patent, molecule and portfolio records
//! - [`routes`]: request/response types per produced operation
//! - [`services`]: the numerical stages and the orchestration service
//! - [`inference`]: embedding/reduction engine interface and a deterministic stub
//! - [`cache`]: best-effort result cache and deterministic cache keys
//! - [`db`]: repository pattern and the in-memory repository
//! - [`config`]: TOML configuration
//! - [`error`]: service error taxonomy
//! - [`http`]: Axum-based HTTP server (feature `http-server`)

// RepositoryError carries rich context for debugging.
#![allow(clippy::result_large_err)]

pub mod api;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod inference;
pub mod models;

pub mod routes;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
