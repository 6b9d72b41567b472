/// Math helpers shared by every shading stage.

pub mod math3d;
pub mod utils;
