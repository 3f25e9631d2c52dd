/// Static analyzer adapters
mod cookstyle_analyzer;

pub use cookstyle_analyzer::{CookstyleAnalyzer, DEFAULT_ANALYZER};
