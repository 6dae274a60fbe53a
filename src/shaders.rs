//! GLSL ES 3.00 sources. Every demo shares `VERTEX` and the fragment
//! prelude; only the fragment `main` differs.

use crate::demo::Demo;

pub const VERTEX: &str = r#"#version 300 es
in vec3 position;
in vec2 uv;

uniform mat4 modelViewMatrix;
uniform mat4 projectionMatrix;

out vec2 vUv;

void main() {
    vUv = uv;
    gl_Position = projectionMatrix * modelViewMatrix * vec4(position, 1.0);
}
"#;

pub const FRAGMENT_PRELUDE: &str = r#"#version 300 es
precision highp float;

in vec2 vUv;
out vec4 fragColor;

uniform sampler2D uTexture;
uniform sampler2D uTexture2;
uniform sampler2D uNoiseTexture;
uniform sampler2D uDataTexture;
uniform sampler2D uFlow;

uniform vec2 uResolution;
uniform vec2 uSize;
uniform vec2 uMouse;
uniform vec2 uLerpedMouse;

uniform float uTime;
uniform float uPeekRadius;
uniform float uHoverProgress;

// Remaps uv so an image of imageSize fills screenSize like `background-size: cover`.
vec2 backgroundCoverUv(vec2 screenSize, vec2 imageSize, vec2 uv) {
    float screenRatio = screenSize.x / screenSize.y;
    float imageRatio = imageSize.x / imageSize.y;
    bool wider = screenRatio < imageRatio;
    vec2 newSize = wider
        ? vec2(imageSize.x * screenSize.y / imageSize.y, screenSize.y)
        : vec2(screenSize.x, imageSize.y * screenSize.x / imageSize.x);
    vec2 newOffset = (wider
        ? vec2((newSize.x - screenSize.x) / 2.0, 0.0)
        : vec2(0.0, (newSize.y - screenSize.y) / 2.0)) / newSize;
    return uv * screenSize / newSize + newOffset;
}

float luminance(vec3 rgb) {
    return dot(rgb, vec3(0.2125, 0.7154, 0.0721));
}

float circle(vec2 st, float r, float blur) {
    return 1.0 - smoothstep(r - r * blur, r + r * blur, dot(st, st) * 4.0);
}

// 3D simplex noise (Ashima Arts / Ian McEwan, MIT).
vec3 mod289(vec3 x) { return x - floor(x * (1.0 / 289.0)) * 289.0; }
vec4 mod289(vec4 x) { return x - floor(x * (1.0 / 289.0)) * 289.0; }
vec4 permute(vec4 x) { return mod289(((x * 34.0) + 1.0) * x); }
vec4 taylorInvSqrt(vec4 r) { return 1.79284291400159 - 0.85373472095314 * r; }

float snoise(vec3 v) {
    const vec2 C = vec2(1.0 / 6.0, 1.0 / 3.0);
    const vec4 D = vec4(0.0, 0.5, 1.0, 2.0);

    vec3 i = floor(v + dot(v, C.yyy));
    vec3 x0 = v - i + dot(i, C.xxx);

    vec3 g = step(x0.yzx, x0.xyz);
    vec3 l = 1.0 - g;
    vec3 i1 = min(g.xyz, l.zxy);
    vec3 i2 = max(g.xyz, l.zxy);

    vec3 x1 = x0 - i1 + C.xxx;
    vec3 x2 = x0 - i2 + C.yyy;
    vec3 x3 = x0 - D.yyy;

    i = mod289(i);
    vec4 p = permute(permute(permute(
                i.z + vec4(0.0, i1.z, i2.z, 1.0))
              + i.y + vec4(0.0, i1.y, i2.y, 1.0))
              + i.x + vec4(0.0, i1.x, i2.x, 1.0));

    float n_ = 0.142857142857;
    vec3 ns = n_ * D.wyz - D.xzx;

    vec4 j = p - 49.0 * floor(p * ns.z * ns.z);
    vec4 x_ = floor(j * ns.z);
    vec4 y_ = floor(j - 7.0 * x_);

    vec4 x = x_ * ns.x + ns.yyyy;
    vec4 y = y_ * ns.x + ns.yyyy;
    vec4 h = 1.0 - abs(x) - abs(y);

    vec4 b0 = vec4(x.xy, y.xy);
    vec4 b1 = vec4(x.zw, y.zw);
    vec4 s0 = floor(b0) * 2.0 + 1.0;
    vec4 s1 = floor(b1) * 2.0 + 1.0;
    vec4 sh = -step(h, vec4(0.0));

    vec4 a0 = b0.xzyw + s0.xzyw * sh.xxyy;
    vec4 a1 = b1.xzyw + s1.xzyw * sh.zzww;

    vec3 p0 = vec3(a0.xy, h.x);
    vec3 p1 = vec3(a0.zw, h.y);
    vec3 p2 = vec3(a1.xy, h.z);
    vec3 p3 = vec3(a1.zw, h.w);

    vec4 norm = taylorInvSqrt(vec4(dot(p0, p0), dot(p1, p1), dot(p2, p2), dot(p3, p3)));
    p0 *= norm.x;
    p1 *= norm.y;
    p2 *= norm.z;
    p3 *= norm.w;

    vec4 m = max(0.6 - vec4(dot(x0, x0), dot(x1, x1), dot(x2, x2), dot(x3, x3)), 0.0);
    m = m * m;
    return 42.0 * dot(m * m, vec4(dot(p0, x0), dot(p1, x1), dot(p2, x2), dot(p3, x3)));
}
"#;

const NORMAL_LIGHT: &str = r#"
void main() {
    vec3 tex = texture(uTexture, vUv).rgb;
    vec3 normal = normalize(texture(uTexture2, vUv).rgb * 2.0 - 1.0);

    vec2 aspect = uResolution / max(uResolution.x, uResolution.y);
    vec2 uv = (vUv - 0.5) * aspect;
    vec2 mouse = uLerpedMouse * aspect;

    vec3 lightDir = normalize(vec3(uv - mouse, 0.5));
    float intensity = pow(max(dot(normal, lightDir), 0.0), 3.0);

    vec3 diffuse = tex * intensity;
    vec3 ambient = tex * vec3(0.2);
    fragColor = vec4(diffuse + ambient, 1.0);
}
"#;

const DEPTH_PARALLAX: &str = r#"
void main() {
    vec2 aspect = uResolution / max(uResolution.x, uResolution.y);
    const float zoom = 0.9;
    vec2 uv = (vUv - 0.5) * zoom + 0.5;
    vec2 offset = uLerpedMouse * aspect * 0.08;

    float depth = texture(uTexture2, uv).r;
    vec3 tex = texture(uTexture, uv + offset * depth).rgb;
    fragColor = vec4(tex, 1.0);
}
"#;

const GRID_DISPLACE: &str = r#"
void main() {
    vec2 coverUv = backgroundCoverUv(uSize, uResolution, vUv);
    vec2 offset = texture(uDataTexture, coverUv).rg;
    vec3 tex = texture(uTexture, coverUv - 0.02 * offset).rgb;
    fragColor = vec4(tex, 1.0);
}
"#;

const PEEK_REVEAL: &str = r#"
void main() {
    vec2 aspect = uResolution / max(uResolution.x, uResolution.y);
    vec2 uv = (vUv - 0.5) * aspect;
    vec2 mouse = uLerpedMouse * aspect;

    float c = circle(uv - mouse, uPeekRadius, 0.08);
    vec3 tex = texture(uTexture, backgroundCoverUv(uSize, uResolution, vUv)).rgb;
    fragColor = vec4(mix(vec3(0.0), tex, c), 1.0);
}
"#;

const FLOW_DISTORT: &str = r#"
void main() {
    vec2 flow = texture(uFlow, vUv).rg;
    vec2 coverUv = backgroundCoverUv(uSize, uResolution, vUv) + flow * 0.05;
    fragColor = vec4(texture(uTexture, coverUv).rgb, 1.0);
}
"#;

const NOISE_REVEAL: &str = r#"
void main() {
    vec2 aspect = uResolution / max(uResolution.x, uResolution.y);
    vec2 uv = (vUv - 0.5) * aspect;
    vec2 mouse = uLerpedMouse * aspect;

    vec2 coverUv = backgroundCoverUv(uSize, uResolution, vUv);
    vec3 tex = texture(uTexture, coverUv).rgb;
    vec3 blurred = texture(uTexture2, coverUv).rgb;
    vec3 gray = vec3(pow(luminance(blurred), 2.25));

    float c = circle(uv - mouse, uPeekRadius, 2.0);

    float time = uTime * 0.05;
    float offX = uv.x + sin(uv.y + time * 2.0);
    float offY = uv.y - time * 0.5 - cos(time * 2.0) * 0.5;
    float n = snoise(vec3(offX, offY, time * 0.5) * 15.0);

    float mask = smoothstep(0.98, 1.0, pow(c, 2.0) * 4.0 + n);
    fragColor = vec4(mix(gray, tex, mask), 1.0);
}
"#;

const GLASS: &str = r#"
void main() {
    vec2 aspect = uResolution / max(uResolution.x, uResolution.y);
    vec2 uv = (vUv - 0.5) * aspect;
    vec2 mouse = uLerpedMouse * aspect;
    vec2 coverUv = backgroundCoverUv(uSize, uResolution, vUv);

    float c = clamp(length(uv - mouse) + (1.0 - uHoverProgress), 0.0, 1.0);
    vec2 noise = texture(uNoiseTexture, uv * 10.0).xy * mix(0.02, 0.04, uHoverProgress);
    fragColor = vec4(texture(uTexture, coverUv + noise * c).rgb, 1.0);
}
"#;

/// Full fragment source for a demo.
pub fn fragment_source(demo: Demo) -> String {
    let body = match demo {
        Demo::NormalLight => NORMAL_LIGHT,
        Demo::DepthParallax => DEPTH_PARALLAX,
        Demo::GridDisplace => GRID_DISPLACE,
        Demo::PeekReveal => PEEK_REVEAL,
        Demo::FlowDistort => FLOW_DISTORT,
        Demo::NoiseReveal => NOISE_REVEAL,
        Demo::Glass => GLASS,
    };
    let mut source = String::with_capacity(FRAGMENT_PRELUDE.len() + body.len());
    source.push_str(FRAGMENT_PRELUDE);
    source.push_str(body);
    source
}

/// Fullscreen triangle for the flow map pass.
pub const FLOW_VERTEX: &str = r#"#version 300 es
precision highp float;
const vec2 POSITIONS[3] = vec2[](
    vec2(-1.0, -1.0),
    vec2(3.0, -1.0),
    vec2(-1.0, 3.0)
);

out vec2 vUv;

void main() {
    vec2 position = POSITIONS[gl_VertexID];
    vUv = position * 0.5 + 0.5;
    gl_Position = vec4(position, 0.0, 1.0);
}
"#;

pub const FLOW_FRAGMENT: &str = r#"#version 300 es
precision highp float;

in vec2 vUv;
out vec4 fragColor;

uniform sampler2D tMap;
uniform float uFalloff;
uniform float uAlpha;
uniform float uDissipation;
uniform float uAspect;
uniform vec2 uMouse;
uniform vec2 uVelocity;

void main() {
    vec4 color = texture(tMap, vUv) * uDissipation;

    vec2 cursor = vUv - uMouse;
    cursor.x *= uAspect;

    vec3 stamp = vec3(uVelocity * vec2(1.0, -1.0), 1.0 - pow(1.0 - min(1.0, length(uVelocity)), 3.0));
    float falloff = smoothstep(uFalloff, 0.0, length(cursor)) * uAlpha;

    color.rgb = mix(color.rgb, stamp, vec3(falloff));
    fragColor = color;
}
"#;
