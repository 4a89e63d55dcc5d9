pub mod aggregator;
pub mod constants;
pub mod dispatcher;
pub mod errors;
pub mod models;
pub mod normalizer;
pub mod record;
pub mod services;
pub mod settings;
pub mod split;
