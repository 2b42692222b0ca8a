pub mod observability;
pub mod ocr;
pub mod pdf;
pub mod persistence;
pub mod queue;
