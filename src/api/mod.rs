pub mod envelope;
pub mod models;

pub use envelope::{BizError, Envelope, ErrorShowType};
