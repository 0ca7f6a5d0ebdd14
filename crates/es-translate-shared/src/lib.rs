#![doc = include_str!("../README.md")]

pub mod equality;
pub mod properties;
