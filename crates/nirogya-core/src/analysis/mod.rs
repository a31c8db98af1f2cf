//! The report analysis workflow: validate, persist (advisory), fetch,
//! classify, summarize, finalize.

pub mod classify;
pub mod workflow;

pub use workflow::{AnalysisWorkflow, AnalyzeRequest, AnalyzeResponse};
