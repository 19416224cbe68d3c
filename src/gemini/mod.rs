// Gemini provider module

mod client;

pub use client::GeminiClient;
