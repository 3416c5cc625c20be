//! # Folio Site
//!
//! Localized portfolio site backend.
//!
//! Wires configuration and the i18n crate into the pieces a frontend needs:
//! locale-prefixed routing, per-page render contexts with the fallback
//! indicator, a multilingual sitemap, and contact-form lead submission.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod error;
pub mod leads;
pub mod routing;
pub mod sitemap;

pub use app::{FallbackSummary, PageContext, Site};
pub use error::{SiteError, SiteResult};
pub use leads::{LeadError, LeadService, LeadStore, LeadSubmission, RestLeadStore};
pub use routing::LocaleRouter;
pub use sitemap::{Alternate, Sitemap, SitemapEntry};
