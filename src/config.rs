//! Configuration files

pub mod pairs;
