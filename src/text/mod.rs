// Text processing — sentence segmentation and term extraction.

pub mod segment;
pub mod tokenize;
