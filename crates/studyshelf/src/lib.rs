pub mod server;

pub mod comments;
pub mod config;
pub mod content;
pub mod error;
pub mod nav;
pub mod resolve;
pub mod search;
pub mod viewer;
pub mod views;

pub use crate::config::SiteConfig;
pub use crate::content::ContentTree;
pub use crate::error::{SiteError, SiteResult};
pub use crate::server::Server;
