//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, hex, secure random tokens)
//! - Password hashing (PBKDF2-HMAC-SHA256 with salt and pepper)
//! - Session cookie formatting and parsing
//! - Client address resolution behind proxies
//! - In-process login rate limiting

pub mod client;
pub mod cookie;
pub mod crypto;
pub mod password;
pub mod rate_limit;
