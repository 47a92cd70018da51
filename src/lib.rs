pub mod analysis;
pub mod ats;
pub mod config;
pub mod llm;
pub mod streaming;
pub mod video;
pub mod web;

pub use web::start_web_server;
