use glam::Mat4;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

/// Fixed screen-space camera: scene pixels with the origin at the top-left
/// and y growing downward. The scene is stretched to whatever surface size
/// the window currently has.
pub struct ScreenCamera {
    pub scene_size: (f32, f32),
}

impl ScreenCamera {
    pub fn new(scene_width: f32, scene_height: f32) -> Self {
        Self {
            scene_size: (scene_width, scene_height),
        }
    }

    pub fn view_proj(&self) -> Mat4 {
        Mat4::orthographic_rh(0.0, self.scene_size.0, self.scene_size.1, 0.0, -1.0, 1.0)
    }

    pub fn build_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_proj().to_cols_array_2d(),
        }
    }
}
