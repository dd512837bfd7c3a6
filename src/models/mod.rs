pub mod content;
pub mod draft;
pub mod page;
