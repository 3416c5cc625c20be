//! # Folio I18n
//!
//! Message resolution and locale-aware formatting for the Folio site.
//!
//! - [`Locale`]: the closed set of supported locales
//! - [`BundleLoader`] / [`MessageBundle`]: one JSON message tree per locale
//! - [`MessageResolver`]: merges a locale's bundle over the default locale's
//!   and records which keys fell back
//! - [`LocaleFormatter`]: dates, numbers and currency, retrying with the
//!   default locale when a locale's formatter fails
//! - [`FallbackIndicator`]: the "auto-fallback" notice derived from a
//!   resolved tree
//!
//! # Example
//!
//! ```no_run
//! use folio_i18n::{BundleLoader, FallbackIndicator, Locale, MessageResolver};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = MessageResolver::from_loader(Locale::English, &BundleLoader::new("messages"))?;
//! let resolved = resolver.resolve(Locale::French)?;
//!
//! println!("{}", resolved.t("home.title"));
//! if let Some(notice) = FallbackIndicator::from_resolved(&resolved).notice(&resolved) {
//!     println!("{notice}");
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod bundle;
pub mod error;
pub mod format;
pub mod indicator;
pub mod locale;
pub mod resolver;
pub mod resource;

pub use bundle::{MessageBundle, MessageNode, MessageTree};
pub use error::{FormatError, FormatResult, FormatterFailure, I18nError, I18nResult};
pub use format::{
    try_format_currency, try_format_date, try_format_number, LocaleFormatter, DEFAULT_CURRENCY,
};
pub use indicator::FallbackIndicator;
pub use locale::Locale;
pub use resolver::{Coverage, FallbackKeys, MessageResolver, ResolvedMessages};
pub use resource::BundleLoader;
