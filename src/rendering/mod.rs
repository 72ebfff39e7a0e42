pub mod encode;

pub use encode::encode_png;
