pub mod api;
pub mod config;
pub mod core;
pub mod infrastructure;

#[cfg(test)]
mod tests;
