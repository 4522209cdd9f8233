pub mod batch;
pub mod camera;
pub mod frame_canvas;
pub mod gpu_context;
pub mod quad_pipeline;
pub mod text;
pub mod texture;
pub mod vertex;

pub use batch::{QuadBatch, TextureSlot};
pub use camera::{CameraUniform, ScreenCamera};
pub use frame_canvas::FrameCanvas;
pub use gpu_context::GpuContext;
pub use quad_pipeline::QuadPipeline;
pub use text::{FontFace, TextSurface};
pub use texture::Texture;
pub use vertex::QuadVertex;
