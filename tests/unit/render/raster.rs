use super::*;
use crate::options::normalize::fixup_options;

fn sink_for(opts: Options) -> RasterSink {
    let mut opts = opts;
    fixup_options(&mut opts);
    RasterSink::new(&opts)
}

fn decode(png: &[u8]) -> image::RgbaImage {
    image::load_from_memory(png).unwrap().to_rgba8()
}

#[test]
fn bar_and_background_land_in_png() {
    let mut sink = sink_for(Options::new().with("backgroundcolor", "ffffff"));
    sink.scale(2.0, 2.0);
    sink.init(10.0, 5.0);
    sink.line(Point::new(1.0, 0.0), Point::new(1.0, 5.0), 2.0, Rgb::BLACK);

    let png = sink.finalize().unwrap();
    let img = decode(&png);
    assert_eq!(img.dimensions(), (20, 10));
    assert_eq!(img.get_pixel(2, 5).0, [0, 0, 0, 255]);
    assert_eq!(img.get_pixel(15, 5).0, [255, 255, 255, 255]);
}

#[test]
fn missing_background_is_transparent() {
    let mut sink = sink_for(Options::new());
    sink.scale(1.0, 1.0);
    sink.init(4.0, 4.0);
    let img = decode(&sink.finalize().unwrap());
    assert_eq!(img.get_pixel(1, 1).0[3], 0);
}

#[test]
fn polygon_fill_uses_pending_path() {
    let mut sink = sink_for(Options::new().with("backgroundcolor", "ffffff"));
    sink.scale(1.0, 1.0);
    sink.init(10.0, 10.0);
    sink.polygon(&[
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(10.0, 5.0),
        Point::new(0.0, 5.0),
    ]);
    sink.fill(Rgb::new(255, 0, 0));
    sink.fill(Rgb::BLACK);

    let img = decode(&sink.finalize().unwrap());
    assert_eq!(img.get_pixel(5, 2).0, [255, 0, 0, 255]);
    assert_eq!(img.get_pixel(5, 8).0, [255, 255, 255, 255]);
}

#[test]
fn padding_and_rotation_change_output_size() {
    let mut sink = sink_for(
        Options::new()
            .with("scale", 1)
            .with("paddingwidth", 3)
            .with("rotate", "R"),
    );
    sink.scale(1.0, 1.0);
    sink.init(10.0, 4.0);
    assert_eq!(sink.size(), Some((4, 16)));
    let img = decode(&sink.finalize().unwrap());
    assert_eq!(img.dimensions(), (4, 16));
}

#[test]
fn text_without_font_is_skipped() {
    let mut sink = sink_for(Options::new());
    sink.scale(2.0, 2.0);
    let font = FontSpec {
        name: "OCR-B".to_owned(),
        width: 10.0,
        height: 10.0,
    };
    let m = sink.measure("123", &font);
    assert!(m.width > 0.0);
    sink.init(10.0, 10.0);
    sink.text(Point::new(0.0, 10.0), "123", Rgb::BLACK, &font);
    assert!(sink.finalize().is_ok());
}

#[test]
fn finalize_before_init_is_a_validation_error() {
    let mut sink = sink_for(Options::new());
    let err = sink.finalize().unwrap_err();
    assert!(matches!(err, BarmillError::Validation(_)));
}

#[test]
fn oversized_surface_is_rejected() {
    let mut sink = sink_for(Options::new());
    sink.scale(10.0, 1.0);
    sink.init(10_000.0, 1.0);
    let err = sink.finalize().unwrap_err();
    assert!(err.to_string().contains("exceeds u16"));
}

#[test]
fn unpremultiply_restores_straight_alpha() {
    assert_eq!(unpremultiply(&[64, 0, 0, 128]), vec![128, 0, 0, 128]);
    assert_eq!(unpremultiply(&[9, 9, 9, 0]), vec![0, 0, 0, 0]);
    assert_eq!(unpremultiply(&[1, 2, 3, 255]), vec![1, 2, 3, 255]);
}
