//! User-account service core: salted password credentials, user↔role link
//! maintenance and permission aggregation, behind pluggable store traits.

pub mod cache;
pub mod config;
pub mod credential;
pub mod db;
pub mod error;
pub mod models;
pub mod service;
pub mod store;

pub use cache::CachedResolver;
pub use error::Error;
pub use service::AccountService;
