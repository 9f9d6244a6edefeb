//! Model oracle adapters.

pub mod openai;

pub use openai::OpenAiCompatibleGateway;
