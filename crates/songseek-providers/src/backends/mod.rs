//! Backend adapters, one per upstream catalog service.

pub mod bugu;
pub mod qq;

pub use bugu::BuguProvider;
pub use qq::QqProvider;
