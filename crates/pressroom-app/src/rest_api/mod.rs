pub mod author;
pub mod paging;
pub mod publication;

pub use paging::{Page, PageMeta, Paging};
