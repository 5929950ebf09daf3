pub mod stored;

pub use stored::render_document;
