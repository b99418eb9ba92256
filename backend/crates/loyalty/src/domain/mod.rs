pub mod badge;
pub mod pricing;
pub mod profile;
pub mod repository;
