pub mod poem;
pub mod sentiment;
pub mod translation;

pub use poem::PoemController;
pub use sentiment::SentimentController;
pub use translation::TranslationController;
