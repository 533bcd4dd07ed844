pub mod color;
pub mod normalize;
pub mod record;
