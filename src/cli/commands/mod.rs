pub mod check;
pub mod config;
pub mod custom;
pub mod file;
pub mod init;
pub mod locations;
pub mod run;
pub mod trip;
