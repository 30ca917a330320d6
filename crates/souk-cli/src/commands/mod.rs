// crates/souk-cli/src/commands/mod.rs

pub mod account;
pub mod admin;
pub mod buy;
pub mod init;
pub mod product;
