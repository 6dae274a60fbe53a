use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Float32Array;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{HtmlImageElement, WebGl2RenderingContext as GL, WebGlTexture};

use crate::error::FxError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wrap {
    Clamp,
    Repeat,
}

impl Wrap {
    fn gl(self) -> i32 {
        match self {
            Wrap::Clamp => GL::CLAMP_TO_EDGE as i32,
            Wrap::Repeat => GL::REPEAT as i32,
        }
    }
}

fn create(gl: &GL, filter: u32, wrap: Wrap) -> Result<WebGlTexture, FxError> {
    let texture = gl
        .create_texture()
        .ok_or_else(|| FxError::WebGl("failed to create texture".into()))?;
    gl.bind_texture(GL::TEXTURE_2D, Some(&texture));
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MIN_FILTER, filter as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MAG_FILTER, filter as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_S, wrap.gl());
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_T, wrap.gl());
    Ok(texture)
}

/// 1×1 transparent texture bound until the real image arrives.
pub fn placeholder(gl: &GL, wrap: Wrap) -> Result<WebGlTexture, JsValue> {
    let texture = create(gl, GL::LINEAR, wrap)?;
    gl.tex_image_2d_with_i32_and_i32_and_i32_and_format_and_type_and_opt_u8_array(
        GL::TEXTURE_2D,
        0,
        GL::RGBA as i32,
        1,
        1,
        0,
        GL::RGBA,
        GL::UNSIGNED_BYTE,
        Some(&[0, 0, 0, 0]),
    )?;
    Ok(texture)
}

pub fn upload_image(gl: &GL, texture: &WebGlTexture, image: &HtmlImageElement) -> Result<(), JsValue> {
    gl.bind_texture(GL::TEXTURE_2D, Some(texture));
    gl.pixel_storei(GL::UNPACK_FLIP_Y_WEBGL, 1);
    let result = gl.tex_image_2d_with_u32_and_u32_and_html_image_element(
        GL::TEXTURE_2D,
        0,
        GL::RGBA as i32,
        GL::RGBA,
        GL::UNSIGNED_BYTE,
        image,
    );
    gl.pixel_storei(GL::UNPACK_FLIP_Y_WEBGL, 0);
    result
}

pub fn upload_rgba8(gl: &GL, texture: &WebGlTexture, size: usize, pixels: &[u8]) -> Result<(), JsValue> {
    gl.bind_texture(GL::TEXTURE_2D, Some(texture));
    gl.tex_image_2d_with_i32_and_i32_and_i32_and_format_and_type_and_opt_u8_array(
        GL::TEXTURE_2D,
        0,
        GL::RGBA8 as i32,
        size as i32,
        size as i32,
        0,
        GL::RGBA,
        GL::UNSIGNED_BYTE,
        Some(pixels),
    )
}

/// Square RGBA32F texture sampled with NEAREST (float textures are not
/// filterable without an extension).
pub fn float_texture(gl: &GL, size: usize, data: &[f32]) -> Result<WebGlTexture, JsValue> {
    let texture = create(gl, GL::NEAREST, Wrap::Clamp)?;
    unsafe {
        let view = Float32Array::view(data);
        gl.tex_image_2d_with_i32_and_i32_and_i32_and_format_and_type_and_opt_array_buffer_view(
            GL::TEXTURE_2D,
            0,
            GL::RGBA32F as i32,
            size as i32,
            size as i32,
            0,
            GL::RGBA,
            GL::FLOAT,
            Some(&view),
        )?;
    }
    Ok(texture)
}

pub fn update_float_texture(gl: &GL, texture: &WebGlTexture, size: usize, data: &[f32]) -> Result<(), JsValue> {
    gl.bind_texture(GL::TEXTURE_2D, Some(texture));
    unsafe {
        let view = Float32Array::view(data);
        gl.tex_sub_image_2d_with_i32_and_i32_and_u32_and_type_and_opt_array_buffer_view(
            GL::TEXTURE_2D,
            0,
            0,
            0,
            size as i32,
            size as i32,
            GL::RGBA,
            GL::FLOAT,
            Some(&view),
        )?;
    }
    Ok(())
}

/// Empty RGBA16F render target for the flow map.
pub fn half_float_target(gl: &GL, size: u32) -> Result<WebGlTexture, JsValue> {
    let texture = create(gl, GL::LINEAR, Wrap::Clamp)?;
    gl.tex_image_2d_with_i32_and_i32_and_i32_and_format_and_type_and_opt_u8_array(
        GL::TEXTURE_2D,
        0,
        GL::RGBA16F as i32,
        size as i32,
        size as i32,
        0,
        GL::RGBA,
        GL::HALF_FLOAT,
        None,
    )?;
    Ok(texture)
}

/// Images that finished loading but have not been handed to a plane yet.
pub type LoadQueue = Rc<RefCell<Vec<(&'static str, HtmlImageElement)>>>;

/// Starts loading `url`; on success the image is pushed onto `queue` under
/// `uniform`. Failures are logged and otherwise ignored.
pub fn load_image(url: &str, uniform: &'static str, queue: &LoadQueue) -> Result<(), JsValue> {
    let image = HtmlImageElement::new()?;
    image.set_cross_origin(Some("anonymous"));

    let onload = {
        let image = image.clone();
        let queue = queue.clone();
        let url = url.to_string();
        Closure::once_into_js(move || {
            log::info!("loaded {uniform} from {url}");
            queue.borrow_mut().push((uniform, image));
        })
    };
    let onerror = {
        let url = url.to_string();
        Closure::once_into_js(move || {
            log::warn!("failed to load {uniform} from {url}");
        })
    };
    image.set_onload(Some(onload.unchecked_ref()));
    image.set_onerror(Some(onerror.unchecked_ref()));
    image.set_src(url);
    Ok(())
}
