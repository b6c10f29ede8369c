pub mod band;
pub mod text_block;
pub mod wrap;
