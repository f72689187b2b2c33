pub mod config;
pub mod error;
pub mod ini;
pub mod layout;
pub mod loader;
pub mod repository;
pub mod vars;

#[cfg(test)]
pub mod test_utils;
