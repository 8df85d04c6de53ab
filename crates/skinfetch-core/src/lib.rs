pub mod acquire;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod control;
pub mod ledger;
pub mod logging;
pub mod remote;
pub mod resolver;
pub mod retry;
pub mod scheduler;
pub mod transcode;
