pub mod cohort;
pub mod config;
pub mod error;
pub mod fetch;
pub mod output;
pub mod repository;
pub mod scoring;
