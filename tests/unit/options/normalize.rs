use super::*;
use serde_json::json;

fn fixed(opts: Options) -> Options {
    let mut opts = opts;
    fixup_options(&mut opts);
    opts
}

#[test]
fn scale_defaults_chain() {
    let o = fixed(Options::new());
    assert_eq!(o.number("scaleX"), Some(2.0));
    assert_eq!(o.number("scaleY"), Some(2.0));

    let o = fixed(Options::new().with("scale", 3));
    assert_eq!(o.number("scaleX"), Some(3.0));
    assert_eq!(o.number("scaleY"), Some(3.0));

    let o = fixed(Options::new().with("scale", 3).with("scaleX", "4"));
    assert_eq!(o.number("scaleX"), Some(4.0));
    assert_eq!(o.number("scaleY"), Some(4.0));

    let o = fixed(Options::new().with("scaleX", 0).with("scaleY", 5));
    assert_eq!(o.number("scaleX"), Some(2.0));
    assert_eq!(o.number("scaleY"), Some(5.0));
}

#[test]
fn padding_precedence_for_every_side() {
    let configs: Vec<Options> = vec![
        Options::new(),
        Options::new().with("padding", 1),
        Options::new().with("padding", 1).with("paddingwidth", 2),
        Options::new().with("padding", 1).with("paddingheight", 3),
        Options::new()
            .with("padding", 1)
            .with("paddingwidth", 2)
            .with("paddingheight", 3)
            .with("paddingleft", 4)
            .with("paddingbottom", 0),
        Options::new().with("paddingtop", 7).with("scaleX", 3).with("scaleY", 5),
    ];

    for cfg in configs {
        let scale = Scale::resolve(&cfg);
        let expect = |side: &str, dim: &str, s: f64| {
            cfg.number(side)
                .or_else(|| cfg.number(dim))
                .or_else(|| cfg.number("padding"))
                .unwrap_or(0.0)
                * s
        };
        let want = [
            ("paddingleft", expect("paddingleft", "paddingwidth", scale.x)),
            ("paddingright", expect("paddingright", "paddingwidth", scale.x)),
            ("paddingtop", expect("paddingtop", "paddingheight", scale.y)),
            ("paddingbottom", expect("paddingbottom", "paddingheight", scale.y)),
        ];
        let out = fixed(cfg.clone());
        for (key, value) in want {
            assert_eq!(out.number(key), Some(value), "{key} for {cfg:?}");
        }
    }
}

#[test]
fn explicit_zero_side_beats_global_padding() {
    let o = fixed(Options::new().with("padding", 5).with("paddingleft", 0));
    assert_eq!(o.number("paddingleft"), Some(0.0));
    assert_eq!(o.number("paddingright"), Some(10.0));
}

#[test]
fn non_numeric_padding_counts_as_absent() {
    let o = fixed(Options::new().with("paddingwidth", "wide").with("padding", 1));
    assert_eq!(o.number("paddingleft"), Some(2.0));
}

#[test]
fn padding_helper_reads_fixed_values() {
    let o = fixed(Options::new().with("paddingwidth", 1).with("paddingheight", 2));
    assert_eq!(
        Padding::from_options(&o),
        Padding {
            top: 4.0,
            left: 2.0,
            right: 2.0,
            bottom: 4.0
        }
    );
}

#[test]
fn cmyk_background_becomes_rgb() {
    let o = fixed(Options::new().with("backgroundcolor", "ffffffff"));
    assert_eq!(o.get("backgroundcolor"), Some(&json!("000000")));

    let o = fixed(Options::new().with("backgroundcolor", "00000081"));
    assert_eq!(o.get("backgroundcolor"), Some(&json!("7e7e7e")));
}

#[test]
fn other_background_values_pass_through() {
    for bg in [json!("FF8800"), json!("red"), json!("fffffffff"), json!(12345678)] {
        let o = fixed(Options::new().with("backgroundcolor", bg.clone()));
        assert_eq!(o.get("backgroundcolor"), Some(&bg));
    }
}

#[test]
fn unrelated_keys_are_untouched() {
    let o = fixed(
        Options::new()
            .with("bcid", "code128")
            .with("includetext", true)
            .with("height", 12.7),
    );
    assert_eq!(o.get("bcid"), Some(&json!("code128")));
    assert_eq!(o.get("includetext"), Some(&json!(true)));
    assert_eq!(o.get("height"), Some(&json!(12.7)));
}
