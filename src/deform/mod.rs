/// Vertex displacement for the warped sphere and the normal rebuild the
/// displaced surface needs in the fragment stage.

pub mod normals;
pub mod warp;
