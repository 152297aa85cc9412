pub mod account_store;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod engine;
pub mod hashing;
pub mod ingestion;
pub mod output_repository;
