pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod gallery;
pub mod html;
pub mod notebook;
pub mod registry;
pub mod schema;
pub mod search;
pub mod server;
pub mod source;
pub mod sync;
pub mod tools;
pub mod tracing;

pub use cache::CacheStore;
pub use config::Config;
pub use error::{FetchError, Result};
pub use fetch::{Fetch, HttpFetcher};
pub use gallery::Example;
pub use registry::ModuleRecord;
pub use server::DocsServer;
pub use source::{DocSource, Endpoints};
