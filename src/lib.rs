//! books - find and open documents in a naming-scheme document tree.
//!
//! Documents live two levels deep: subject folders named `subject__keyword`
//! hold files named `authors__title.ext`, with authors separated by `_`.
//! books rebuilds an in-memory [`Catalog`] from that layout on every run and
//! resolves free-text search terms against it.
//!
//! # Quick start
//!
//! ```no_run
//! use books::{Config, Query, catalog, resolve};
//!
//! let config = Config::with_root("/home/me/docs/books");
//! let catalog = catalog::build(&config).unwrap();
//!
//! for entry in resolve::resolve(&catalog, &Query::new(["knuth", "algo"])) {
//!     println!("{}", entry.path.display());
//! }
//! ```

pub mod browse;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod naming;
pub mod opener;
pub mod resolve;
pub mod select;
pub mod walker;

pub use catalog::{Catalog, CatalogEntry, SubjectGroup};
pub use config::Config;
pub use error::{Error, Result};
pub use opener::Opener;
pub use resolve::Query;
