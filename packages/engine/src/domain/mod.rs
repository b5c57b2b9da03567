pub mod content;
pub mod particle;
pub mod point;
