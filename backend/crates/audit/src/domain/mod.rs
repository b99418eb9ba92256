pub mod entry;
pub mod repository;
