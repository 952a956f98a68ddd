pub mod preview_quad;
pub use preview_quad::PreviewQuad;

fn face_to_tri(v: &[u8; 4]) -> [u8; 6] {
    [v[0], v[1], v[3], v[3], v[2], v[0]]
}
