//! Versions and release tracking.
//!
//! A version groups the user stories that ship together. Its status is set
//! directly; moving a version to released stamps the release date.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
