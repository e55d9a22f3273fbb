//! Retained `Mesh2d` geometry for the asset-free fallbacks.
//!
//! When no art is available the scene still has to look deliberate: the
//! backdrop becomes a vertical gradient quad and the astronaut a rounded
//! body with a helmet disc.  Both are uploaded once when training starts and
//! only their transforms change afterwards.
//!
//! All meshes here are built at **unit size** centred on the origin, so a
//! `Transform::scale` of the target size in pixels is all a caller needs.

use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::{Indices, PrimitiveTopology};

/// Backdrop gradient, top colour.
pub fn gradient_top() -> Color {
    Color::srgb_u8(0x07, 0x10, 0x24)
}

/// Backdrop gradient, bottom colour.
pub fn gradient_bottom() -> Color {
    Color::srgb_u8(0x04, 0x20, 0x2a)
}

/// Placeholder astronaut body.
pub fn placeholder_body() -> Color {
    Color::srgb_u8(0x0e, 0xa5, 0xa4)
}

/// Placeholder astronaut helmet.
pub fn placeholder_helmet() -> Color {
    Color::srgb_u8(0x08, 0x33, 0x44)
}

/// Fan-triangulate a convex polygon into a renderable [`Mesh`].
///
/// Triangle fan from vertex 0: triangles `(0, i, i+1)` for `i ∈ 1..n-2`.
pub fn filled_polygon_mesh(vertices: &[Vec2]) -> Mesh {
    let n = vertices.len();
    debug_assert!(n >= 3, "polygon must have ≥ 3 vertices");

    let positions: Vec<[f32; 3]> = vertices.iter().map(|v| [v.x, v.y, 0.0]).collect();
    let normals: Vec<[f32; 3]> = vec![[0.0, 0.0, 1.0]; n];
    // Unit-size local coords map straight onto 0–1 UVs.
    let uvs: Vec<[f32; 2]> = vertices.iter().map(|v| [v.x + 0.5, 0.5 - v.y]).collect();

    let mut indices: Vec<u32> = Vec::with_capacity(n.saturating_sub(2) * 3);
    for i in 1..(n as u32).saturating_sub(1) {
        indices.extend_from_slice(&[0, i, i + 1]);
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

/// Outline of a unit square with rounded corners, counter-clockwise.
///
/// `radius` is a fraction of the side (clamped to `0.5`); each corner gets
/// `segments` straight pieces.
pub fn rounded_square_points(radius: f32, segments: u32) -> Vec<Vec2> {
    let r = radius.clamp(0.0, 0.5);
    let segments = segments.max(1);
    let inner = 0.5 - r;
    // Corner centres, starting bottom-right, counter-clockwise.
    let corners = [
        (Vec2::new(inner, -inner), -std::f32::consts::FRAC_PI_2),
        (Vec2::new(inner, inner), 0.0),
        (Vec2::new(-inner, inner), std::f32::consts::FRAC_PI_2),
        (Vec2::new(-inner, -inner), std::f32::consts::PI),
    ];

    let mut points = Vec::with_capacity(corners.len() * (segments as usize + 1));
    for (centre, start) in corners {
        for s in 0..=segments {
            let a = start + std::f32::consts::FRAC_PI_2 * s as f32 / segments as f32;
            points.push(centre + Vec2::new(a.cos(), a.sin()) * r);
        }
    }
    points
}

/// Unit quad whose vertex colours blend from `top` to `bottom`.
pub fn vertical_gradient_mesh(top: Color, bottom: Color) -> Mesh {
    let top = top.to_linear().to_f32_array();
    let bottom = bottom.to_linear().to_f32_array();
    let positions: Vec<[f32; 3]> = vec![
        [-0.5, -0.5, 0.0],
        [0.5, -0.5, 0.0],
        [0.5, 0.5, 0.0],
        [-0.5, 0.5, 0.0],
    ];
    let colors: Vec<[f32; 4]> = vec![bottom, bottom, top, top];

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, vec![[0.0, 0.0, 1.0]; 4]);
    mesh.insert_attribute(
        Mesh::ATTRIBUTE_UV_0,
        vec![[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]],
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
    mesh.insert_indices(Indices::U32(vec![0, 1, 2, 0, 2, 3]));
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounded_square_stays_inside_unit_box() {
        let pts = rounded_square_points(20.0 / 220.0, 6);
        assert_eq!(pts.len(), 4 * 7);
        for p in &pts {
            assert!(p.x.abs() <= 0.5 + 1e-5 && p.y.abs() <= 0.5 + 1e-5, "{p:?}");
        }
        // Flat edges reach the box edges.
        assert!(pts.iter().any(|p| (p.x - 0.5).abs() < 1e-5));
        assert!(pts.iter().any(|p| (p.y + 0.5).abs() < 1e-5));
    }

    #[test]
    fn polygon_mesh_is_fan_triangulated() {
        let pts = rounded_square_points(0.1, 4);
        let mesh = filled_polygon_mesh(&pts);
        let Some(Indices::U32(indices)) = mesh.indices() else {
            panic!("expected u32 indices");
        };
        assert_eq!(indices.len(), (pts.len() - 2) * 3);
    }
}
