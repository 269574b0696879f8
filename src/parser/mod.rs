pub mod errors;
pub mod models;
pub mod stream_selector;
pub mod url_parser;

pub use errors::ParseError;
pub use models::{PreferenceRule, QualityMatch, Rendition, SelectionPreference, SelectionResult};
pub use stream_selector::{StreamSelector, select};
pub use url_parser::parse_video_ref;
