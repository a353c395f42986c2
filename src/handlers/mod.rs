pub mod catalog;
pub mod couple;
pub mod partie;
pub mod stats;
