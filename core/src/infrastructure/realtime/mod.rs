pub mod event_stream;
pub mod firebase;
pub mod tree;
