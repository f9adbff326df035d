pub mod anime;
pub mod page;

pub use anime::Anime;
pub use page::Page;
