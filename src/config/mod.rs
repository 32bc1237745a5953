//! Configuration module

mod site;

pub use site::CacheConfig;
pub use site::CacheMode;
pub use site::ContentConfig;
pub use site::ListingConfig;
pub use site::NavLink;
pub use site::ServerConfig;
pub use site::SiteConfig;
pub use site::SourceKind;
