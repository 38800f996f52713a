use glam::{Mat4, Vec3, Vec4};

use crate::lights::LightParams;

/// Mesh identity handed to the renderer; geometry itself lives behind the
/// render capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    Ground,
    SunMarker,
    Craft,
    LampMarker,
    Cube,
    Cylinder,
    Sphere,
}

/// Parameters for the unlit path: flat color only. Used for the small
/// marker meshes that represent the light sources themselves.
#[derive(Debug, Clone, Copy)]
pub struct FlatParams {
    pub color: Vec4,
}

/// Everything one lit draw needs for a single light source
#[derive(Debug, Clone, Copy)]
pub struct LightUniforms {
    /// Light position in the object's model space (lighting is evaluated
    /// against vertex normals authored in that space)
    pub position_model: Vec4,
    /// Light position in camera space, for view-dependent terms
    pub position_camera: Vec4,
    pub intensity: Vec3,
    pub ambient: Vec3,
    pub attenuation: f32,
}

/// Parameters for the two-light Lambertian path. Embeds the flat set
/// rather than extending it: the set of shading variants is closed, so
/// composition replaces the original inheritance.
#[derive(Debug, Clone, Copy)]
pub struct LitParams {
    pub flat: FlatParams,
    pub sun: LightUniforms,
    pub lamp: LightUniforms,
}

impl LitParams {
    /// Derive per-object light positions from the model matrix: camera-space
    /// light positions are pulled back into model space via the inverse
    /// model-to-camera transform.
    pub fn for_object(
        model_to_camera: Mat4,
        color: Vec3,
        sun_in_camera: Vec4,
        lamp_in_camera: Vec4,
        sun: LightParams,
        lamp: LightParams,
    ) -> Self {
        let inverse_model = model_to_camera.inverse();

        Self {
            flat: FlatParams {
                color: color.extend(1.0),
            },
            sun: LightUniforms {
                position_model: inverse_model * sun_in_camera,
                position_camera: sun_in_camera,
                intensity: sun.intensity,
                ambient: sun.ambient,
                attenuation: sun.attenuation,
            },
            lamp: LightUniforms {
                position_model: inverse_model * lamp_in_camera,
                position_camera: lamp_in_camera,
                intensity: lamp.intensity,
                ambient: lamp.ambient,
                attenuation: lamp.attenuation,
            },
        }
    }
}

/// Shading variant for one draw
#[derive(Debug, Clone, Copy)]
pub enum Shading {
    Flat(FlatParams),
    Lit(LitParams),
}

/// One renderable object for this frame: mesh, composed model-to-camera
/// matrix, and the shading inputs the external renderer should upload.
#[derive(Debug, Clone, Copy)]
pub struct DrawCommand {
    pub mesh: MeshKind,
    pub model_to_camera: Mat4,
    pub shading: Shading,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn light(intensity: f32) -> LightParams {
        LightParams {
            intensity: Vec3::splat(intensity),
            ambient: Vec3::splat(0.1),
            attenuation: 0.01,
        }
    }

    #[test]
    fn identity_model_keeps_light_in_place() {
        let sun_cam = Vec4::new(10.0, 20.0, 30.0, 1.0);
        let params = LitParams::for_object(
            Mat4::IDENTITY,
            Vec3::ONE,
            sun_cam,
            Vec4::W,
            light(5.0),
            light(8.0),
        );

        assert_eq!(params.sun.position_model, sun_cam);
        assert_eq!(params.sun.position_camera, sun_cam);
    }

    #[test]
    fn translated_model_pulls_light_back() {
        // Object translated +5 on x: a light at the camera-space origin
        // sits at -5 in the object's model space
        let model = Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0));
        let params = LitParams::for_object(
            model,
            Vec3::ONE,
            Vec4::new(0.0, 0.0, 0.0, 1.0),
            Vec4::W,
            light(5.0),
            light(8.0),
        );

        assert!((params.sun.position_model.x + 5.0).abs() < 1e-5);
    }

    #[test]
    fn per_light_constants_pass_through() {
        let params = LitParams::for_object(
            Mat4::IDENTITY,
            Vec3::new(0.2, 0.8, 0.3),
            Vec4::W,
            Vec4::W,
            light(5.0),
            light(8.0),
        );

        assert_eq!(params.sun.intensity, Vec3::splat(5.0));
        assert_eq!(params.lamp.intensity, Vec3::splat(8.0));
        assert_eq!(params.flat.color, Vec4::new(0.2, 0.8, 0.3, 1.0));
    }
}
