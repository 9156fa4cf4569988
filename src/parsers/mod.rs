pub mod pdf;
pub mod text;
pub mod traits;
pub mod wallet;

pub mod prelude {
    pub use super::pdf::PdfReader;
    pub use super::text::TextReader;
    pub use super::traits::DocumentReader;
    pub use super::wallet::prelude::*;
}
