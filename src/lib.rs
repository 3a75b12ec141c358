//! Bhutan tours: tour catalog filtering and lead-capture forms.
//!
//! The library carries the catalog engine ([`catalog`]), the form framework
//! ([`forms`]) and a client for the tours API ([`services::ToursApiClient`]).
//! The binary serves the same catalog and accepts form submissions over HTTP.

pub mod api;
pub mod app;
pub mod catalog;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod forms;
pub mod logging;
pub mod middleware;
pub mod routes;
pub mod services;
