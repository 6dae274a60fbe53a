//! A textured quad that overlays one DOM image and runs its demo's shader.

use std::collections::BTreeMap;
use std::rc::Rc;

use glam::{Mat4, Vec2, Vec3};
use js_sys::Float32Array;
use wasm_bindgen::JsValue;
use web_sys::{
    HtmlElement, HtmlImageElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram,
    WebGlTexture, WebGlUniformLocation, WebGlVertexArrayObject,
};

use super::flowmap::FlowMap;
use super::program::link_program;
use super::texture::{self, LoadQueue, Wrap};
use crate::camera::Camera;
use crate::config::Settings;
use crate::demo::Demo;
use crate::effect::PlaneState;
use crate::error::FxError;
use crate::layout::{ElementRect, PlaneTransform};
use crate::noise;
use crate::raycast::PlaneBounds;
use crate::shaders;
use crate::uniforms::{self, UniformValue};

#[rustfmt::skip]
const POSITIONS: [f32; 18] = [
    -0.5, -0.5, 0.0,   0.5, -0.5, 0.0,   0.5,  0.5, 0.0,
    -0.5, -0.5, 0.0,   0.5,  0.5, 0.0,  -0.5,  0.5, 0.0,
];
#[rustfmt::skip]
const UVS: [f32; 12] = [
    0.0, 0.0,   1.0, 0.0,   1.0, 1.0,
    0.0, 0.0,   1.0, 1.0,   0.0, 1.0,
];

pub struct Plane {
    pub state: PlaneState,
    element: HtmlElement,
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    _buffers: [WebGlBuffer; 2],
    locations: BTreeMap<String, Option<WebGlUniformLocation>>,
    textures: BTreeMap<&'static str, WebGlTexture>,
    images: BTreeMap<&'static str, HtmlImageElement>,
    loads: LoadQueue,
    noise_pixels: Option<Vec<u8>>,
    flow_map: Option<FlowMap>,
}

impl Plane {
    pub fn new(gl: &GL, element: HtmlElement, demo: Demo, settings: Settings) -> Result<Self, JsValue> {
        let fragment = shaders::fragment_source(demo);
        let program = link_program(gl, shaders::VERTEX, &fragment)?;
        let (vao, buffers) = Self::geometry(gl, &program)?;

        let state = PlaneState::new(demo, settings);
        let locations = state
            .uniforms
            .iter()
            .map(|(name, _)| (name.to_string(), gl.get_uniform_location(&program, name)))
            .collect();

        let mut textures = BTreeMap::new();
        for (name, _) in uniforms::SAMPLERS {
            let wrap = if name == uniforms::NOISE_TEXTURE {
                Wrap::Repeat
            } else {
                Wrap::Clamp
            };
            let handle = if name == uniforms::DATA_TEXTURE {
                match &state.grid {
                    Some(grid) => texture::float_texture(gl, grid.size(), grid.data())?,
                    None => texture::placeholder(gl, wrap)?,
                }
            } else {
                texture::placeholder(gl, wrap)?
            };
            textures.insert(name, handle);
        }

        let flow_map = if demo.uses_flow_map() {
            FlowMap::new(gl, &state.settings().flow)?
        } else {
            None
        };

        let mut plane = Self {
            state,
            element,
            program,
            vao,
            _buffers: buffers,
            locations,
            textures,
            images: BTreeMap::new(),
            loads: Rc::default(),
            noise_pixels: None,
            flow_map,
        };
        plane.load_textures()?;
        Ok(plane)
    }

    fn geometry(gl: &GL, program: &WebGlProgram) -> Result<(WebGlVertexArrayObject, [WebGlBuffer; 2]), FxError> {
        let vao = gl
            .create_vertex_array()
            .ok_or_else(|| FxError::WebGl("failed to create plane VAO".into()))?;
        gl.bind_vertex_array(Some(&vao));

        let upload = |name: &str, data: &[f32], components: i32| -> Result<WebGlBuffer, FxError> {
            let buffer = gl
                .create_buffer()
                .ok_or_else(|| FxError::WebGl(format!("failed to create {name} buffer")))?;
            gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
            unsafe {
                let view = Float32Array::view(data);
                gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &view, GL::STATIC_DRAW);
            }
            let location = gl.get_attrib_location(program, name);
            if location >= 0 {
                gl.vertex_attrib_pointer_with_i32(location as u32, components, GL::FLOAT, false, 0, 0);
                gl.enable_vertex_attrib_array(location as u32);
            }
            Ok(buffer)
        };
        let positions = upload("position", &POSITIONS, 3)?;
        let uvs = upload("uv", &UVS, 2)?;

        gl.bind_vertex_array(None);
        Ok((vao, [positions, uvs]))
    }

    fn load_textures(&mut self) -> Result<(), JsValue> {
        let demo = self.state.demo;
        let attr = |name: &str| self.element.get_attribute(name).filter(|v| !v.is_empty());

        match attr("src") {
            Some(url) => texture::load_image(&url, uniforms::TEXTURE, &self.loads)?,
            None => log::warn!("image element has no src"),
        }

        if demo.uses_second_texture() {
            match attr("data-src2").or_else(|| attr("data-normal-src")) {
                Some(url) => texture::load_image(&url, uniforms::TEXTURE2, &self.loads)?,
                None => log::warn!("{demo:?} expects data-src2 on the image"),
            }
        }

        if demo.uses_noise_texture() {
            match attr("data-noise-src") {
                Some(url) => texture::load_image(&url, uniforms::NOISE_TEXTURE, &self.loads)?,
                None => {
                    self.noise_pixels = Some(noise::value_noise_rgba(noise::DEFAULT_SIZE, noise::DEFAULT_SEED));
                    if let Some(slot) = self.state.uniforms.texture_mut(uniforms::NOISE_TEXTURE) {
                        slot.touch();
                    }
                }
            }
        }
        Ok(())
    }

    pub fn bounds(&self) -> PlaneBounds {
        self.state.transform.bounds()
    }

    /// Re-reads the element's box and places the plane over it.
    pub fn resize(&mut self, dpr: f32, canvas: Vec2) -> Result<(), FxError> {
        let rect = self.element.get_bounding_client_rect();
        let rect = ElementRect {
            left: rect.left() as f32,
            top: rect.top() as f32,
            width: rect.width() as f32,
            height: rect.height() as f32,
        };
        self.state
            .set_layout(PlaneTransform::from_rect(rect, dpr, canvas))
    }

    pub fn update(&mut self, gl: &GL, hit: Option<Vec2>, dt: f32) -> Result<(), JsValue> {
        let loaded: Vec<_> = self.loads.borrow_mut().drain(..).collect();
        for (name, image) in loaded {
            if name == uniforms::TEXTURE {
                self.state
                    .set_image_size(image.natural_width() as f32, image.natural_height() as f32)?;
            }
            if let Some(slot) = self.state.uniforms.texture_mut(name) {
                slot.touch();
            }
            self.images.insert(name, image);
        }

        self.state.update(hit, dt)?;

        if let (Some(flow_map), Some(input)) = (self.flow_map.as_mut(), self.state.flow.as_ref()) {
            let aspect = 1.0 / self.state.transform.aspect();
            flow_map.update(gl, input, aspect);
        }

        self.upload_textures(gl)
    }

    fn upload_textures(&mut self, gl: &GL) -> Result<(), JsValue> {
        for (name, _) in uniforms::SAMPLERS {
            let Some(slot) = self.state.uniforms.texture_mut(name) else {
                continue;
            };
            if !slot.needs_upload() {
                continue;
            }
            let Some(handle) = self.textures.get(name) else {
                continue;
            };

            if name == uniforms::DATA_TEXTURE {
                if let Some(grid) = &self.state.grid {
                    texture::update_float_texture(gl, handle, grid.size(), grid.data())?;
                }
            } else if let Some(image) = self.images.get(name) {
                texture::upload_image(gl, handle, image)?;
            } else if name == uniforms::NOISE_TEXTURE {
                if let Some(pixels) = &self.noise_pixels {
                    texture::upload_rgba8(gl, handle, noise::DEFAULT_SIZE, pixels)?;
                }
            }
            slot.mark_uploaded();
        }
        Ok(())
    }

    pub fn draw(&mut self, gl: &GL, camera: &Camera) -> Result<(), JsValue> {
        let transform = self.state.transform;
        let model = Mat4::from_scale_rotation_translation(
            Vec3::new(transform.scale.x, transform.scale.y, 1.0),
            glam::Quat::IDENTITY,
            transform.position,
        );
        self.state
            .uniforms
            .set_mat4(uniforms::MODEL_VIEW, &(camera.view() * model))?;
        self.state
            .uniforms
            .set_mat4(uniforms::PROJECTION, &camera.projection())?;

        gl.use_program(Some(&self.program));
        gl.bind_vertex_array(Some(&self.vao));

        for (name, value) in self.state.uniforms.iter() {
            let Some(Some(location)) = self.locations.get(name) else {
                continue;
            };
            match value {
                UniformValue::Float(v) => gl.uniform1f(Some(location), *v),
                UniformValue::Vec2([x, y]) => gl.uniform2f(Some(location), *x, *y),
                UniformValue::Mat4(m) => gl.uniform_matrix4fv_with_f32_array(Some(location), false, m),
                UniformValue::Texture(slot) => {
                    let handle = match (name, &self.flow_map) {
                        (uniforms::FLOW, Some(flow_map)) => Some(flow_map.texture()),
                        _ => self.textures.get(name),
                    };
                    gl.active_texture(GL::TEXTURE0 + slot.unit);
                    gl.bind_texture(GL::TEXTURE_2D, handle);
                    gl.uniform1i(Some(location), slot.unit as i32);
                }
            }
        }

        gl.draw_arrays(GL::TRIANGLES, 0, 6);
        gl.bind_vertex_array(None);
        Ok(())
    }
}
