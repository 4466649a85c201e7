//! Feed digest builder: load syndication feeds, translate the newest entries
//! into Arabic, and render them as a single static HTML page.

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod render;
pub mod services;
pub mod sources;

#[cfg(test)]
mod test_support;
