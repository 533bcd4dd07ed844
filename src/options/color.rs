use crate::foundation::core::Rgb;

/// Convert an 8-hex-digit `CCMMYYKK` string to RGB.
///
/// Returns `None` for anything that is not exactly eight hex digits.
pub fn cmyk_hex_to_rgb(s: &str) -> Option<Rgb> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let unit = |i: usize| -> Option<f64> {
        u8::from_str_radix(&s[i..i + 2], 16)
            .ok()
            .map(|b| f64::from(b) / 255.0)
    };
    let (c, m, y, k) = (unit(0)?, unit(2)?, unit(4)?, unit(6)?);
    // Product order matters: reordering changes the floor for some inputs.
    let channel = |primary: f64| ((1.0 - primary) * (1.0 - k) * 255.0).floor() as u8;
    Some(Rgb::new(channel(c), channel(m), channel(y)))
}

#[cfg(test)]
#[path = "../../tests/unit/options/color.rs"]
mod tests;
