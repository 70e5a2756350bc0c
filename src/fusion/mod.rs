//! Fusion arithmetic - weight math for fusing and planning chip pairs

pub mod arithmetic;

pub use arithmetic::{defuse_lower, defuse_upper, fuse, fuse_complement, LevelFloors};
