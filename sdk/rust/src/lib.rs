//! Typed client for the HTTP response analyzer API.

pub mod client;

pub use client::{Analysis, AnalysisReport, AnalyzeRequest, AnalyzerClient, SdkError};
