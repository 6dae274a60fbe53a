//! GPU-resident velocity field, advanced with a ping-pong pair of render
//! targets.

use web_sys::{
    WebGl2RenderingContext as GL, WebGlFramebuffer, WebGlProgram, WebGlTexture,
    WebGlUniformLocation, WebGlVertexArrayObject,
};

use super::{program::link_program, texture};
use crate::config::FlowSettings;
use crate::error::FxError;
use crate::flow::FlowInput;
use crate::shaders;

struct Target {
    texture: WebGlTexture,
    framebuffer: WebGlFramebuffer,
}

struct Locations {
    map: Option<WebGlUniformLocation>,
    falloff: Option<WebGlUniformLocation>,
    alpha: Option<WebGlUniformLocation>,
    dissipation: Option<WebGlUniformLocation>,
    aspect: Option<WebGlUniformLocation>,
    mouse: Option<WebGlUniformLocation>,
    velocity: Option<WebGlUniformLocation>,
}

pub struct FlowMap {
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    read: Target,
    write: Target,
    locations: Locations,
    settings: FlowSettings,
}

impl FlowMap {
    /// `None` when the context cannot render to float targets.
    pub fn new(gl: &GL, settings: &FlowSettings) -> Result<Option<Self>, FxError> {
        let supported = gl
            .get_extension("EXT_color_buffer_float")
            .ok()
            .flatten()
            .is_some();
        if !supported {
            log::warn!("EXT_color_buffer_float unavailable; flow map disabled");
            return Ok(None);
        }

        let program = link_program(gl, shaders::FLOW_VERTEX, shaders::FLOW_FRAGMENT)?;
        let vao = gl
            .create_vertex_array()
            .ok_or_else(|| FxError::WebGl("failed to create flow VAO".into()))?;
        let locations = Locations {
            map: gl.get_uniform_location(&program, "tMap"),
            falloff: gl.get_uniform_location(&program, "uFalloff"),
            alpha: gl.get_uniform_location(&program, "uAlpha"),
            dissipation: gl.get_uniform_location(&program, "uDissipation"),
            aspect: gl.get_uniform_location(&program, "uAspect"),
            mouse: gl.get_uniform_location(&program, "uMouse"),
            velocity: gl.get_uniform_location(&program, "uVelocity"),
        };

        Ok(Some(Self {
            read: Self::target(gl, settings.size)?,
            write: Self::target(gl, settings.size)?,
            program,
            vao,
            locations,
            settings: settings.clone(),
        }))
    }

    fn target(gl: &GL, size: u32) -> Result<Target, FxError> {
        let texture = texture::half_float_target(gl, size)
            .map_err(|e| FxError::WebGl(format!("flow target: {e:?}")))?;
        let framebuffer = gl
            .create_framebuffer()
            .ok_or_else(|| FxError::WebGl("failed to create flow framebuffer".into()))?;
        gl.bind_framebuffer(GL::FRAMEBUFFER, Some(&framebuffer));
        gl.framebuffer_texture_2d(
            GL::FRAMEBUFFER,
            GL::COLOR_ATTACHMENT0,
            GL::TEXTURE_2D,
            Some(&texture),
            0,
        );
        gl.clear_color(0.0, 0.0, 0.0, 0.0);
        gl.clear(GL::COLOR_BUFFER_BIT);
        gl.bind_framebuffer(GL::FRAMEBUFFER, None);
        Ok(Target {
            texture,
            framebuffer,
        })
    }

    /// The most recently written field.
    pub fn texture(&self) -> &WebGlTexture {
        &self.read.texture
    }

    /// Runs one dissipate-and-stamp pass. `aspect` is plane width over height.
    /// Leaves the default framebuffer bound; the caller restores its viewport.
    pub fn update(&mut self, gl: &GL, input: &FlowInput, aspect: f32) {
        let size = self.settings.size as i32;
        gl.bind_framebuffer(GL::FRAMEBUFFER, Some(&self.write.framebuffer));
        gl.viewport(0, 0, size, size);
        gl.use_program(Some(&self.program));
        gl.bind_vertex_array(Some(&self.vao));

        gl.active_texture(GL::TEXTURE0);
        gl.bind_texture(GL::TEXTURE_2D, Some(&self.read.texture));

        let loc = &self.locations;
        gl.uniform1i(loc.map.as_ref(), 0);
        gl.uniform1f(loc.falloff.as_ref(), self.settings.falloff);
        gl.uniform1f(loc.alpha.as_ref(), self.settings.alpha);
        gl.uniform1f(loc.dissipation.as_ref(), self.settings.dissipation);
        gl.uniform1f(loc.aspect.as_ref(), aspect);
        gl.uniform2f(loc.mouse.as_ref(), input.mouse.x, input.mouse.y);
        gl.uniform2f(loc.velocity.as_ref(), input.velocity.x, input.velocity.y);

        gl.disable(GL::BLEND);
        gl.draw_arrays(GL::TRIANGLES, 0, 3);

        gl.bind_vertex_array(None);
        gl.bind_framebuffer(GL::FRAMEBUFFER, None);
        std::mem::swap(&mut self.read, &mut self.write);
    }
}
