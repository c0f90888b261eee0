pub mod extract;
pub mod fetcher;
pub mod source;

pub use fetcher::Fetcher;
pub use source::{HttpPageSource, PageSource};

pub mod prelude {
    pub use super::fetcher::Fetcher;
    pub use super::source::PageSource;
    pub use nd_core::{Error, Result};
}
