/// Parameters of a (p, q) torus knot tube.
///
/// Vertex generation belongs to the renderer; the scene only owns the
/// description and its lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct TorusKnotGeometry {
    pub radius: f32,
    pub tube: f32,
    pub tubular_segments: u32,
    pub radial_segments: u32,
    pub p: u32,
    pub q: u32,
}

impl TorusKnotGeometry {
    pub fn new(radius: f32, tube: f32, tubular_segments: u32, radial_segments: u32, p: u32, q: u32) -> Self {
        Self {
            radius,
            tube,
            tubular_segments,
            radial_segments,
            p,
            q,
        }
    }

    pub fn vertex_count(&self) -> u32 {
        (self.tubular_segments + 1) * (self.radial_segments + 1)
    }

    pub fn index_count(&self) -> u32 {
        self.tubular_segments * self.radial_segments * 6
    }
}

/// Metallic-roughness surface description.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardMaterial {
    pub color: u32,
    pub metalness: f32,
    pub roughness: f32,
}

impl Default for StandardMaterial {
    fn default() -> Self {
        Self {
            color: 0xffffff,
            metalness: 0.0,
            roughness: 1.0,
        }
    }
}

/// Geometry + material with a rotation, in radians per axis.
#[derive(Debug, Clone)]
pub struct Mesh<G> {
    pub geometry: Option<G>,
    pub material: Option<StandardMaterial>,
    pub rotation: glam::Vec3,
}

impl<G> Mesh<G> {
    pub fn new(geometry: G, material: StandardMaterial) -> Self {
        Self {
            geometry: Some(geometry),
            material: Some(material),
            rotation: glam::Vec3::ZERO,
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.geometry.is_none() && self.material.is_none()
    }

    /// Releases geometry and material. Safe to call twice.
    pub fn dispose(&mut self) {
        self.geometry = None;
        self.material = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn torus_knot_counts() {
        let g = TorusKnotGeometry::new(1.0, 0.4, 200, 40, 2, 1);
        assert_eq!(g.vertex_count(), 201 * 41);
        assert_eq!(g.index_count(), 200 * 40 * 6);
    }

    #[test]
    fn dispose_is_idempotent() {
        let mut mesh = Mesh::new(TorusKnotGeometry::new(1.0, 0.4, 8, 4, 2, 3), StandardMaterial::default());
        assert!(!mesh.is_disposed());
        mesh.dispose();
        mesh.dispose();
        assert!(mesh.is_disposed());
    }
}
