//! Google Gemini `generateContent` REST driver.

mod client;
mod dto;

pub use client::{API_KEY_HEADER, GeminiClient};
pub use dto::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    InlineData, Part,
};
