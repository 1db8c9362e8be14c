pub mod copilot;
pub mod error;
pub mod lmstudio;
pub mod schema;
pub mod traits;
pub mod types;

pub use copilot::Copilot;
pub use error::LlmError;
pub use lmstudio::LmStudio;
pub use schema::StructuredOutput;
pub use traits::ChatBackend;
pub use types::{ChatRequest, ChatResponse, ResponseFormat, Role, Usage, WireMessage};
