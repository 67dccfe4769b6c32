// src/ports/mod.rs
pub mod html;
pub mod terminal;

pub use html::HtmlPresenter;
