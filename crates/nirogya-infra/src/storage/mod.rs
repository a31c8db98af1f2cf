//! Object storage backends.

pub mod filesystem;

pub use filesystem::LocalObjectStore;
