pub mod aggregation;
pub mod color;
pub mod dto;
pub mod navigation;
