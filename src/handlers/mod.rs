// src/handlers/mod.rs

pub mod attempts;
pub mod health;
pub mod questions;
