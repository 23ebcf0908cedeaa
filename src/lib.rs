#![no_std]

pub mod config;
pub mod infrastructure;
