pub type PremulRgba8 = [u8; 4];

pub const OPAQUE_BLACK: PremulRgba8 = [0, 0, 0, 255];

/// Premultiplied source-over of `src`, weighted by `opacity`, onto `dst`.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let coverage = (opacity.clamp(0.0, 1.0) * 255.0).round() as u16;
    let src_alpha = scale_channel(src[3], coverage);
    if src_alpha == 0 {
        return dst;
    }

    let keep = 255 - u16::from(src_alpha);
    std::array::from_fn(|c| {
        let s = if c == 3 {
            src_alpha
        } else {
            scale_channel(src[c], coverage)
        };
        s.saturating_add(scale_channel(dst[c], keep))
    })
}

/// `v * k / 255`, rounded.
fn scale_channel(v: u8, k: u16) -> u8 {
    ((u32::from(v) * u32::from(k) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/blend.rs"]
mod tests;
