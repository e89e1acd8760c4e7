pub mod document;

pub use document::{Document, Links, Profile, Project};
