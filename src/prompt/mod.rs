pub mod builder;
pub mod styles;
pub mod template;
