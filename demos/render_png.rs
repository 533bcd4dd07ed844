//! Render a toy binary bar pattern to a PNG through the buffer entry point.
//!
//! `cargo run --example render_png -- '{"bcid":"binary","text":"1011001","scale":4}' out.png`

use barmill::{Drawing, Encoder, EncodingError, Options, Point, Rgb, StackItem, to_buffer};

/// Every `1` in the payload is a full-height bar one unit wide.
struct BinaryBars;

impl Encoder for BinaryBars {
    fn encode(
        &self,
        drawing: &mut dyn Drawing,
        bcid: &str,
        text: &str,
        opts: &Options,
    ) -> Result<(), EncodingError> {
        if bcid != "binary" {
            return Err(EncodingError::new(format!("unknown symbology '{bcid}'")));
        }
        if let Some(bad) = text.chars().find(|c| !matches!(c, '0' | '1')) {
            return Err(EncodingError::new(format!("'{bad}' is not a binary digit")));
        }
        let height = opts.number("height").map_or(0.5, |h| h * 72.0);
        drawing.init(text.len() as f64, height);
        for (i, _) in text.char_indices().filter(|(_, c)| *c == '1') {
            let x = i as f64 + 0.5;
            drawing.line(Point::new(x, 0.0), Point::new(x, height), 1.0, Rgb::BLACK);
        }
        Ok(())
    }

    fn encode_raw(
        &self,
        _drawing: &mut dyn Drawing,
        _bcid: &str,
        _text: &str,
        _opts: &Options,
    ) -> Result<Vec<StackItem>, EncodingError> {
        Ok(Vec::new())
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let opts = match args.next() {
        Some(json) => Options::from_json_str(&json)?,
        None => Options::new()
            .with("bcid", "binary")
            .with("text", "1011001110")
            .with("scale", 4)
            .with("padding", 2)
            .with("backgroundcolor", "00000000"),
    };
    let out = args.next().unwrap_or_else(|| "barcode.png".to_owned());

    let png = pollster::block_on(to_buffer(opts, &BinaryBars))?;
    std::fs::write(&out, &png)?;
    println!("wrote {} bytes to {out}", png.len());
    Ok(())
}
