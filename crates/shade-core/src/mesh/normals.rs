//! Face and vertex normal computation
//!
//! Face normals come from the cross product of two triangle edges. Vertex
//! normals are the unweighted sum of the normals of every face touching the
//! vertex, renormalized. Both passes go through [`safe_normalize`], so a
//! degenerate triangle or an isolated vertex yields the zero vector instead
//! of NaN.

use glam::Vec3;

use crate::constants::NORMAL_EPSILON;

/// Normalize `v`, or return the zero vector when its length is at most
/// [`NORMAL_EPSILON`].
pub fn safe_normalize(v: Vec3) -> Vec3 {
    let length = v.length();
    if length > NORMAL_EPSILON {
        v / length
    } else {
        Vec3::ZERO
    }
}

/// Normal of the triangle `(v1, v2, v3)` in declaration order.
///
/// Counter-clockwise winding seen from the front yields a normal pointing
/// towards the viewer.
pub fn face_normal(v1: Vec3, v2: Vec3, v3: Vec3) -> Vec3 {
    safe_normalize((v2 - v1).cross(v3 - v1))
}

/// Compute one normal per face, in face order.
///
/// Every index in `faces` must be a valid index into `vertices`; the loader
/// validates this before meshes reach here.
pub fn compute_face_normals(vertices: &[Vec3], faces: &[[u32; 3]]) -> Vec<Vec3> {
    faces
        .iter()
        .map(|&[a, b, c]| {
            face_normal(
                vertices[a as usize],
                vertices[b as usize],
                vertices[c as usize],
            )
        })
        .collect()
}

/// Compute one normal per vertex by accumulating face normals.
///
/// `face_normals[i]` must belong to `faces[i]`. No area or angle weighting is
/// applied. Vertices that no face references get the zero vector.
pub fn compute_vertex_normals(
    vertices: &[Vec3],
    faces: &[[u32; 3]],
    face_normals: &[Vec3],
) -> Vec<Vec3> {
    debug_assert_eq!(faces.len(), face_normals.len());

    let mut accumulated = vec![Vec3::ZERO; vertices.len()];

    for (face, &normal) in faces.iter().zip(face_normals) {
        for &index in face {
            accumulated[index as usize] += normal;
        }
    }

    accumulated.into_iter().map(safe_normalize).collect()
}

/// Face and vertex normals for one mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshNormals {
    /// One normal per face
    pub face: Vec<Vec3>,
    /// One normal per vertex
    pub vertex: Vec<Vec3>,
}

impl MeshNormals {
    /// Run the face pass followed by the vertex pass
    pub fn compute(vertices: &[Vec3], faces: &[[u32; 3]]) -> Self {
        let face = compute_face_normals(vertices, faces);
        let vertex = compute_vertex_normals(vertices, faces, &face);
        Self { face, vertex }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1e-5;

    fn is_unit(v: Vec3) -> bool {
        (v.length() - 1.0).abs() < TOLERANCE
    }

    fn is_finite(v: Vec3) -> bool {
        v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
    }

    #[test]
    fn test_unit_right_triangle() {
        let vertices = [Vec3::ZERO, Vec3::X, Vec3::Y];
        let faces = [[0, 1, 2]];

        let normals = MeshNormals::compute(&vertices, &faces);

        assert_eq!(normals.face, vec![Vec3::Z]);
        assert_eq!(normals.vertex, vec![Vec3::Z; 3]);
    }

    #[test]
    fn test_face_normal_perpendicular_to_edges() {
        let v1 = Vec3::new(0.3, -1.2, 2.0);
        let v2 = Vec3::new(4.1, 0.5, -0.7);
        let v3 = Vec3::new(-2.2, 3.3, 1.1);

        let n = face_normal(v1, v2, v3);

        assert!(is_unit(n));
        assert!(n.dot(v2 - v1).abs() < TOLERANCE);
        assert!(n.dot(v3 - v1).abs() < TOLERANCE);
    }

    #[test]
    fn test_winding_flips_normal() {
        let front = face_normal(Vec3::ZERO, Vec3::X, Vec3::Y);
        let back = face_normal(Vec3::ZERO, Vec3::Y, Vec3::X);
        assert_eq!(front, -back);
    }

    #[test]
    fn test_collinear_face_is_zero() {
        let n = face_normal(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0), Vec3::new(2.0, 2.0, 2.0));
        assert_eq!(n, Vec3::ZERO);
    }

    #[test]
    fn test_coincident_face_is_zero() {
        let p = Vec3::new(5.0, -3.0, 2.0);
        let n = face_normal(p, p, p);
        assert!(is_finite(n));
        assert_eq!(n, Vec3::ZERO);
    }

    #[test]
    fn test_tiny_triangle_below_epsilon_is_zero() {
        // Cross product magnitude is 1e-8, well under the threshold
        let n = face_normal(Vec3::ZERO, Vec3::new(1e-4, 0.0, 0.0), Vec3::new(0.0, 1e-4, 0.0));
        assert_eq!(n, Vec3::ZERO);
    }

    #[test]
    fn test_shared_vertex_averages_two_faces() {
        // Two triangles hinged along the edge (0, 1), one in the XY plane
        // and one in the XZ plane.
        let vertices = [Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::NEG_Z];
        let faces = [[0, 1, 2], [0, 1, 3]];

        let normals = MeshNormals::compute(&vertices, &faces);
        let n1 = normals.face[0];
        let n2 = normals.face[1];
        assert_eq!(n1, Vec3::Z);
        assert_eq!(n2, Vec3::Y);

        let expected = (n1 + n2).normalize();
        assert!(normals.vertex[0].abs_diff_eq(expected, TOLERANCE));
        assert!(normals.vertex[1].abs_diff_eq(expected, TOLERANCE));
        assert_eq!(normals.vertex[2], n1);
        assert_eq!(normals.vertex[3], n2);
    }

    #[test]
    fn test_opposing_faces_cancel_to_zero() {
        let vertices = [Vec3::ZERO, Vec3::X, Vec3::Y];
        let faces = [[0, 1, 2], [0, 2, 1]];

        let normals = MeshNormals::compute(&vertices, &faces);

        for n in &normals.vertex {
            assert!(is_finite(*n));
            assert_eq!(*n, Vec3::ZERO);
        }
    }

    #[test]
    fn test_isolated_vertex_is_zero() {
        let vertices = [Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::new(9.0, 9.0, 9.0)];
        let faces = [[0, 1, 2]];

        let normals = MeshNormals::compute(&vertices, &faces);

        assert_eq!(normals.vertex.len(), 4);
        assert_eq!(normals.vertex[3], Vec3::ZERO);
    }

    #[test]
    fn test_degenerate_face_does_not_poison_neighbours() {
        let vertices = [Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::new(2.0, 0.0, 0.0)];
        // Second face is collinear along the X axis
        let faces = [[0, 1, 2], [0, 1, 3]];

        let normals = MeshNormals::compute(&vertices, &faces);

        assert_eq!(normals.face[1], Vec3::ZERO);
        assert_eq!(normals.vertex[0], Vec3::Z);
        assert_eq!(normals.vertex[1], Vec3::Z);
        assert_eq!(normals.vertex[3], Vec3::ZERO);
    }

    #[test]
    fn test_unweighted_accumulation() {
        // A large and a small triangle share vertex 0; with no area weighting
        // both count equally.
        let vertices = [
            Vec3::ZERO,
            Vec3::new(100.0, 0.0, 0.0),
            Vec3::new(0.0, 100.0, 0.0),
            Vec3::new(0.0, 0.0, -0.01),
            Vec3::new(0.01, 0.0, 0.0),
        ];
        let faces = [[0, 1, 2], [0, 3, 4]];

        let normals = MeshNormals::compute(&vertices, &faces);

        let expected = (normals.face[0] + normals.face[1]).normalize();
        assert!(normals.vertex[0].abs_diff_eq(expected, TOLERANCE));
    }

    #[test]
    fn test_recomputation_is_bit_identical() {
        let vertices = [
            Vec3::new(0.1, 0.2, 0.3),
            Vec3::new(1.7, -0.4, 0.9),
            Vec3::new(-0.6, 1.1, 2.4),
            Vec3::new(0.8, 0.8, -1.5),
        ];
        let faces = [[0, 1, 2], [0, 2, 3], [1, 3, 2]];

        let face = compute_face_normals(&vertices, &faces);
        let first = compute_vertex_normals(&vertices, &faces, &face);
        let second = compute_vertex_normals(&vertices, &faces, &face);

        let bits = |normals: &[Vec3]| -> Vec<[u32; 3]> {
            normals
                .iter()
                .map(|n| [n.x.to_bits(), n.y.to_bits(), n.z.to_bits()])
                .collect()
        };
        assert_eq!(bits(&first), bits(&second));
    }

    #[test]
    fn test_vertex_normals_are_unit_or_zero() {
        // Closed tetrahedron
        let vertices = [
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(-1.0, 1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
        ];
        let faces = [[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]];

        let normals = MeshNormals::compute(&vertices, &faces);

        for n in normals.face.iter().chain(&normals.vertex) {
            assert!(is_unit(*n));
        }
        // Each corner normal of a regular tetrahedron points away from the centroid
        for (v, n) in vertices.iter().zip(&normals.vertex) {
            assert!(n.abs_diff_eq(v.normalize(), TOLERANCE));
        }
    }

    #[test]
    fn test_safe_normalize() {
        assert_eq!(safe_normalize(Vec3::new(0.0, 3.0, 4.0)), Vec3::new(0.0, 0.6, 0.8));
        assert_eq!(safe_normalize(Vec3::ZERO), Vec3::ZERO);
        assert_eq!(safe_normalize(Vec3::splat(1e-7)), Vec3::ZERO);
    }

    #[test]
    fn test_empty_inputs() {
        let normals = MeshNormals::compute(&[], &[]);
        assert!(normals.face.is_empty());
        assert!(normals.vertex.is_empty());
    }
}
