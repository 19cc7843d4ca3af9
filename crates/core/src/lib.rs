pub mod cache;
pub mod categories;
pub mod collection;
pub mod content;
pub mod error;
pub mod language;
pub mod lifecycle;
pub mod slug;
pub mod types;
