pub mod config;
pub mod course;
pub mod quiz;
pub mod roadmap;
