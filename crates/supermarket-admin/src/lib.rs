pub mod check;
pub mod config;
pub mod credentials;
pub mod menu;
pub mod render;
pub mod report;
pub mod seed;
