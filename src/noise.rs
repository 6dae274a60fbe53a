//! Procedural tile used when no noise image is supplied.

pub const DEFAULT_SIZE: usize = 64;
pub const DEFAULT_SEED: u32 = 0x5EED_A55E;

/// Lattice cells per tile edge. Must divide the tile size for seamless wrap.
const CELLS: usize = 8;

/// Seamless RGBA8 value noise, `size × size` texels. R and G are independent
/// fields, B is their average, A is opaque.
pub fn value_noise_rgba(size: usize, seed: u32) -> Vec<u8> {
    let mut pixels = vec![0u8; size * size * 4];
    if size == 0 {
        return pixels;
    }
    let cell = size as f32 / CELLS as f32;

    for y in 0..size {
        for x in 0..size {
            let fx = x as f32 / cell;
            let fy = y as f32 / cell;
            let r = sample(fx, fy, seed);
            let g = sample(fx, fy, seed.wrapping_add(0x9E37_79B9));
            let index = (y * size + x) * 4;
            pixels[index] = to_byte(r);
            pixels[index + 1] = to_byte(g);
            pixels[index + 2] = to_byte((r + g) * 0.5);
            pixels[index + 3] = 255;
        }
    }
    pixels
}

fn sample(x: f32, y: f32, seed: u32) -> f32 {
    let x0 = x.floor() as i32;
    let y0 = y.floor() as i32;
    let tx = fade(x - x0 as f32);
    let ty = fade(y - y0 as f32);

    let corner = |cx: i32, cy: i32| {
        let wx = cx.rem_euclid(CELLS as i32);
        let wy = cy.rem_euclid(CELLS as i32);
        hash2(wx, wy, seed) as f32 / u32::MAX as f32
    };

    let top = lerp(corner(x0, y0), corner(x0 + 1, y0), tx);
    let bottom = lerp(corner(x0, y0 + 1), corner(x0 + 1, y0 + 1), tx);
    lerp(top, bottom, ty)
}

fn hash2(x: i32, y: i32, seed: u32) -> u32 {
    let mut h = (x.wrapping_mul(374_761_393) ^ y.wrapping_mul(668_265_263)) as u32 ^ seed;
    h ^= h >> 13;
    h = h.wrapping_mul(1_274_126_177);
    h ^ (h >> 16)
}

fn fade(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
