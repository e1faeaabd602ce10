pub mod llm;
pub mod messaging;
pub mod realtime;
