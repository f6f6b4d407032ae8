// ABOUTME: AI gateway integration for the Hivemind services
// ABOUTME: Groq chat-completions client and feedback prompt assembly

pub mod feedback;
pub mod service;

// Re-export service types
pub use service::{
    AIServiceError, AIServiceResult, ContentPart, GroqService, ImageUrl,
};
