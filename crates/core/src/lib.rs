//! Core of the post timeline: CSV tokenizing, post normalization, date
//! filtering and the application service that ties them to the ports.

pub mod application;
pub mod config;
pub mod csv;
pub mod domain;
pub mod filter;
pub mod normalize;
pub mod ports;
pub mod source;
pub mod utils;
