//! External service integrations

pub mod ocr_engine;

pub use ocr_engine::OcrEngineClient;
