//! # Primitive Shape Generation
//!
//! Spheres for stars and planets, flat annuli for ring systems, and a scattered
//! starfield used as the scene backdrop.

use super::GeometryData;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f32::consts::{PI, TAU};

/// Generate a UV sphere with specified resolution
///
/// # Arguments
/// * `longitude_segments` - Number of vertical segments (longitude lines)
/// * `latitude_segments` - Number of horizontal segments (latitude lines)
///
/// Returns a sphere of radius 1.0 centered at the origin.
pub fn generate_sphere(longitude_segments: u32, latitude_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32; // 0 to PI
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        for long in 0..=long_segs {
            let phi = long as f32 * TAU / long_segs as f32;
            let x = sin_theta * phi.cos();
            let y = cos_theta;
            let z = sin_theta * phi.sin();

            data.vertices.push([x, y, z]);
            data.normals.push([x, y, z]); // Normal is same as position for unit sphere
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            data.indices.extend_from_slice(&[first, second, first + 1]);
            data.indices.extend_from_slice(&[second, second + 1, first + 1]);
        }
    }

    data
}

/// Generate a flat annulus in the XY plane, facing +Z.
///
/// Radii are in final scene units; a ring is drawn at scale 1.0 and tilted into
/// the orbital plane by its object transform.
pub fn generate_ring(inner_radius: f32, outer_radius: f32, segments: u32) -> GeometryData {
    let mut data = GeometryData::new();
    let segs = segments.max(3);

    for i in 0..=segs {
        let angle = i as f32 * TAU / segs as f32;
        let (sin, cos) = angle.sin_cos();
        for radius in [inner_radius, outer_radius] {
            data.vertices.push([radius * cos, radius * sin, 0.0]);
            data.normals.push([0.0, 0.0, 1.0]);
        }
    }

    for i in 0..segs {
        let inner = i * 2;
        let outer = inner + 1;
        let next_inner = inner + 2;
        let next_outer = inner + 3;

        data.indices.extend_from_slice(&[inner, outer, next_outer]);
        data.indices.extend_from_slice(&[inner, next_outer, next_inner]);
    }

    data
}

/// Scatter `count` small octahedra over a sphere of radius `distance`.
///
/// The same seed always yields the same sky.
pub fn generate_starfield(count: u32, distance: f32, star_size: f32, seed: u64) -> GeometryData {
    let mut data = GeometryData::new();
    let mut rng = StdRng::seed_from_u64(seed);

    const CORNERS: [[f32; 3]; 6] = [
        [1.0, 0.0, 0.0],
        [-1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
    ];
    const FACES: [[u32; 3]; 8] = [
        [0, 2, 4],
        [2, 1, 4],
        [1, 3, 4],
        [3, 0, 4],
        [2, 0, 5],
        [1, 2, 5],
        [3, 1, 5],
        [0, 3, 5],
    ];

    for _ in 0..count {
        // Uniform direction on the unit sphere.
        let z: f32 = rng.random_range(-1.0..1.0);
        let phi: f32 = rng.random_range(0.0..TAU);
        let r = (1.0 - z * z).max(0.0).sqrt();
        let center = [r * phi.cos() * distance, z * distance, r * phi.sin() * distance];
        let size = star_size * rng.random_range(0.5..1.5);

        let base = data.vertices.len() as u32;
        for corner in CORNERS {
            data.vertices.push([
                center[0] + corner[0] * size,
                center[1] + corner[1] * size,
                center[2] + corner[2] * size,
            ]);
            data.normals.push(corner);
        }
        for face in FACES {
            data.indices
                .extend_from_slice(&[base + face[0], base + face[1], base + face[2]]);
        }
    }

    data
}
