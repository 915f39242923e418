// Question generation: prompt rendering, the completion call, and parsing
// the model's reply into a question list.
// All completion calls go through llm_client.

pub mod handlers;
pub mod parser;
pub mod prompts;
