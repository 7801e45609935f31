pub mod acquisition;
pub mod actions;
pub mod extraction;
pub mod llm;
pub mod remote;

pub use acquisition::{AcquisitionError, AcquisitionPolicy, AcquisitionRequest};
pub use llm::{GeminiGenerator, TextGenerator};
