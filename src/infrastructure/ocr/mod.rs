mod tesseract_engine;

pub use tesseract_engine::TesseractEngine;
