//! @acp:module "Commands"
//! @acp:summary "CLI command implementations"
//! @acp:domain timing
//! @acp:layer handler
//!
//! Each command is in its own submodule and takes an options struct.

pub mod allocate;
pub mod init;
pub mod tables;

pub use allocate::{execute_allocate, generate_plan, AllocateOptions};
pub use init::{execute_init, InitOptions};
pub use tables::{effective_tables, execute_tables, TablesOptions, TypeTiming};
