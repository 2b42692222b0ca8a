//! Asynchronous OCR job service.
//!
//! Clients submit an image or multi-page PDF and poll later for the
//! extracted text. Submission stages the upload, records a job, and hands a
//! work item to the queue; a background worker decomposes the document,
//! runs each page through the external OCR engine under a per-page deadline,
//! and writes the terminal result back for polling.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
