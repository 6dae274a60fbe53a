use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{window, HtmlCanvasElement, WebGl2RenderingContext as GL};

use super::plane::Plane;
use crate::camera::Camera;
use crate::layout::device_pixel_ratio;
use crate::pointer::Pointer;
use crate::raycast::{intersect_nearest, Intersection};

/// Owns the WebGL2 context, camera, pointer and the planes drawn each frame.
pub struct Renderer {
    pub gl: GL,
    canvas: HtmlCanvasElement,
    pub camera: Camera,
    pub pointer: Pointer,
    pub planes: Vec<Plane>,
    pub intersect: Option<Intersection>,
    max_dpr: f32,
    dpr: f32,
    css_size: Vec2,
}

impl Renderer {
    pub fn new(canvas: HtmlCanvasElement, pointer_lerp: f32, max_dpr: f32) -> Result<Self, JsValue> {
        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &"antialias".into(), &true.into())?;
        js_sys::Reflect::set(&options, &"alpha".into(), &true.into())?;
        let gl: GL = canvas
            .get_context_with_context_options("webgl2", &options)?
            .ok_or("WebGL2 not supported")?
            .dyn_into()?;

        gl.clear_color(0.0, 0.0, 0.0, 0.0);
        gl.disable(GL::DEPTH_TEST);
        gl.disable(GL::CULL_FACE);

        Ok(Self {
            gl,
            canvas,
            camera: Camera::default(),
            pointer: Pointer::new(pointer_lerp),
            planes: Vec::new(),
            intersect: None,
            max_dpr,
            dpr: 1.0,
            css_size: Vec2::ONE,
        })
    }

    /// Canvas size in device pixels.
    pub fn canvas_size(&self) -> Vec2 {
        Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }

    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        let raw_dpr = window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
        self.dpr = device_pixel_ratio(raw_dpr, self.max_dpr);
        self.css_size = Vec2::new(width as f32, height as f32);

        self.canvas.set_width((width * self.dpr as f64) as u32);
        self.canvas.set_height((height * self.dpr as f64) as u32);
        let style = self.canvas.style();
        style.set_property("width", &format!("{width}px"))?;
        style.set_property("height", &format!("{height}px"))?;

        let size = self.canvas_size();
        self.camera.resize(size.x, size.y);

        let (dpr, canvas) = (self.dpr, size);
        for plane in &mut self.planes {
            plane.resize(dpr, canvas)?;
        }
        Ok(())
    }

    pub fn update_pointer(&mut self, x: f32, y: f32) {
        self.pointer
            .set_client(x, y, self.css_size.x, self.css_size.y);
    }

    /// Smooths the pointer, raycasts, updates every plane and draws.
    pub fn render(&mut self, dt: f32) -> Result<(), JsValue> {
        let ndc = self.pointer.step();
        let ray = self.camera.ray_from_ndc(ndc);
        let bounds: Vec<_> = self.planes.iter().map(Plane::bounds).collect();
        self.intersect = intersect_nearest(&ray, &bounds);

        for (index, plane) in self.planes.iter_mut().enumerate() {
            let hit = self
                .intersect
                .filter(|hit| hit.plane == index)
                .map(|hit| hit.point);
            plane.update(&self.gl, hit, dt)?;
        }

        self.gl.bind_framebuffer(GL::FRAMEBUFFER, None);
        let size = self.canvas_size();
        self.gl.viewport(0, 0, size.x as i32, size.y as i32);
        self.gl.clear(GL::COLOR_BUFFER_BIT);
        for plane in &mut self.planes {
            plane.draw(&self.gl, &self.camera)?;
        }
        Ok(())
    }
}
