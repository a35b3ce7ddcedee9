pub mod analyze;
pub mod cards;
pub mod due;
pub mod map;
pub mod review;
pub mod similarity;
