mod gemini;
mod traits;

pub use gemini::{parse_response, GeminiClient, GenerateRequest};
pub use traits::{GenerationConfig, GenerationError, Generator};
