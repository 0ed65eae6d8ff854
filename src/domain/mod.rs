pub mod article;
pub mod page;

pub use article::{format_time, Article};
pub use page::Page;
