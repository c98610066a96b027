// Pipeline orchestration — the end-to-end plagiarism check.

pub mod check;

pub use check::Checker;
