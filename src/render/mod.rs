pub mod composite;
pub mod cpu;
pub mod encode;
pub mod pipeline;
pub mod surface;
pub mod text;
