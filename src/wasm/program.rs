use web_sys::{WebGl2RenderingContext as GL, WebGlProgram, WebGlShader};

use crate::error::FxError;

pub fn link_program(gl: &GL, vertex: &str, fragment: &str) -> Result<WebGlProgram, FxError> {
    let vs = compile_shader(gl, GL::VERTEX_SHADER, vertex)?;
    let fs = compile_shader(gl, GL::FRAGMENT_SHADER, fragment)?;

    let program = gl
        .create_program()
        .ok_or_else(|| FxError::WebGl("unable to create program".into()))?;
    gl.attach_shader(&program, &vs);
    gl.attach_shader(&program, &fs);
    gl.link_program(&program);

    // Shaders are owned by the program once linked.
    gl.delete_shader(Some(&vs));
    gl.delete_shader(Some(&fs));

    let linked = gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);
    if linked {
        Ok(program)
    } else {
        let info = gl
            .get_program_info_log(&program)
            .unwrap_or_else(|| "unknown link error".into());
        gl.delete_program(Some(&program));
        Err(FxError::ProgramLink(info))
    }
}

fn compile_shader(gl: &GL, kind: u32, source: &str) -> Result<WebGlShader, FxError> {
    let shader = gl
        .create_shader(kind)
        .ok_or_else(|| FxError::WebGl("unable to create shader".into()))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    let compiled = gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);
    if compiled {
        Ok(shader)
    } else {
        let info = gl
            .get_shader_info_log(&shader)
            .unwrap_or_else(|| "unknown compile error".into());
        gl.delete_shader(Some(&shader));
        Err(FxError::ShaderCompile(info))
    }
}
