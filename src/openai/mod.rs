// OpenAI provider module

mod client;

pub use client::OpenAiClient;
