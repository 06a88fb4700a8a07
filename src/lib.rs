//! Front-end core of the MusicJack download page: locale resolution and
//! the download submission workflow, with the page itself abstracted
//! behind a trait the host shell implements.

pub mod api;
pub mod app;
pub mod application;
pub mod domain;
pub mod i18n;
pub mod storage;
pub mod ui;
pub mod utils;

pub use app::PageController;
