//! HTML sanitization for user-authored content.

mod allow_list;

pub use allow_list::AllowListSanitizer;
