pub mod banner;
pub mod commands;
pub mod config;
pub mod consts;
pub mod service;
pub mod spinner;
pub mod workflow;
