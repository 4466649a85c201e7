pub mod feed;
pub mod entry;
pub mod article;

pub use feed::{default_sources, source_label, FeedSource};
pub use entry::{LinkRef, MediaRef, RawEntry};
pub use article::{Article, ArticleBody, LanguageStatus};
