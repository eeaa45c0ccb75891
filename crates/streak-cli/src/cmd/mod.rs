pub mod config;
pub mod cycle;
pub mod init;
pub mod mark;
pub mod remind;
pub mod stats;
