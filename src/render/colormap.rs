/// Yellow -> orange -> red ramp (ColorBrewer YlOrRd, deck.gl's default heatmap range)
const YL_OR_RD: [(u8, u8, u8); 6] = [
    (255, 255, 178),
    (254, 217, 118),
    (254, 178, 76),
    (253, 141, 60),
    (240, 59, 32),
    (189, 0, 38),
];

/// Map a normalized intensity [0.0, 1.0] onto the heat ramp
pub fn heat_color(value: f64) -> (u8, u8, u8) {
    let v = value.clamp(0.0, 1.0);
    let idx = v * (YL_OR_RD.len() - 1) as f64;
    let i = idx.floor() as usize;

    if i >= YL_OR_RD.len() - 1 {
        return YL_OR_RD[YL_OR_RD.len() - 1];
    }

    let t = idx - i as f64;
    let (r0, g0, b0) = YL_OR_RD[i];
    let (r1, g1, b1) = YL_OR_RD[i + 1];
    let lerp = |a: u8, b: u8| (a as f64 + t * (b as f64 - a as f64)).round() as u8;

    (lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
}

/// Alpha-blend `color` over `background`
pub fn blend(color: (u8, u8, u8), background: (u8, u8, u8), alpha: f64) -> (u8, u8, u8) {
    let a = alpha.clamp(0.0, 1.0);
    let mix = |c: u8, bg: u8| (c as f64 * a + bg as f64 * (1.0 - a)).round() as u8;
    (
        mix(color.0, background.0),
        mix(color.1, background.1),
        mix(color.2, background.2),
    )
}
