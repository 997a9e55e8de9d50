pub mod iframe;
pub mod widget;
