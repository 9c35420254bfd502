mod claims;
mod session;

pub use claims::{Claims, TokenKind};
pub use session::Session;
