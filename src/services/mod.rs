pub mod translation_service;
pub mod normalize_service;
pub mod digest_service;

pub use translation_service::{GeminiTranslator, Translation, TranslationRequest, Translator};
pub use normalize_service::{NormalizeReport, NormalizeService, NormalizeSettings};
pub use digest_service::{DigestOutcome, DigestService, FeedFailure, RunStatus};
