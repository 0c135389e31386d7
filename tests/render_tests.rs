use kvmemo::render::{format_float, render_args, Arg, Render};

#[test]
fn test_render_literals() {
    assert_eq!(Arg::from("cat").render(), "\"cat\"");
    assert_eq!(Arg::from("say \"hi\"\n").render(), "\"say \\\"hi\\\"\\n\"");
    assert_eq!(Arg::from(42i64).render(), "42");
    assert_eq!(Arg::from(-7i64).render(), "-7");
    assert_eq!(Arg::from(2.5).render(), "2.5");
    assert_eq!(Arg::from(3.0).render(), "3.0", "Floats keep their decimal point");
    assert_eq!(Arg::from(vec![0u8, b'a', 0xff]).render(), "b\"\\x00a\\xff\"");
}

#[test]
fn test_render_args_tuple() {
    assert_eq!(render_args(&[]), "()");
    assert_eq!(render_args(&["a".into()]), "(\"a\")");
    assert_eq!(
        render_args(&["a".into(), 1i64.into(), 1.5f64.into()]),
        "(\"a\", 1, 1.5)"
    );
}

#[test]
fn test_render_results() {
    assert_eq!("key-123".to_string().render(), "key-123", "String results render raw");
    assert_eq!(Some(5i64).render(), "Some(5)");
    assert_eq!(None::<i64>.render(), "None");
    assert_eq!(().render(), "()");
}

#[test]
fn test_stored_payload() {
    assert_eq!(Arg::from("cat").to_bytes(), b"cat".to_vec());
    assert_eq!(Arg::from(42i64).to_bytes(), b"42".to_vec());
    assert_eq!(Arg::from(3.0).to_bytes(), b"3.0".to_vec());
    assert_eq!(Arg::from(&b"\x01\x02"[..]).to_bytes(), vec![1u8, 2]);
}

#[test]
fn test_option_results_stay_distinct() {
    let present = Some("None".to_string()).render();
    let absent = None::<String>.render();
    assert_eq!(present, "Some(None)");
    assert_eq!(absent, "None");
    assert_ne!(present, absent, "A present \"None\" string must not look like an absent value");
}

#[test]
fn test_float_forms_match_redis_clients() {
    assert_eq!(format_float(1e20), "1e+20");
    assert_eq!(format_float(1.5e-5), "1.5e-05");
    assert_eq!(format_float(-2.5e-300), "-2.5e-300");
    assert_eq!(format_float(1e15), "1000000000000000.0");
    assert_eq!(format_float(f64::NAN), "nan");
    assert_eq!(format_float(f64::INFINITY), "inf");
    assert_eq!(format_float(f64::NEG_INFINITY), "-inf");

    assert_eq!(Arg::from(1e20).to_bytes(), b"1e+20".to_vec());
    assert_eq!(Arg::from(1e20).render(), "1e+20");
    assert_eq!(1.5e-5f64.render(), "1.5e-05");
}
