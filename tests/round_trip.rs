use proptest::prelude::*;
use repy_serial::prelude::*;
use repy_strategy::*;

fn all_options() -> Vec<Options> {
    let mut out = Vec::new();
    for unit in &[LengthUnit::Chars, LengthUnit::Utf16, LengthUnit::Bytes] {
        for key_prefix in &[KeyPrefix::Body, KeyPrefix::Whole] {
            out.push(
                Options::new()
                    .with_unit(*unit)
                    .with_key_prefix(*key_prefix)
                    .with_integers(IntegerTag::Int),
            );
        }
    }
    out
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 1_000, ..ProptestConfig::default() })]

    #[test]
    fn encode_decode(v in arb_value_no_int()) {
        let enc = encode(&v);
        let dec = decode(&enc);

        if dec.as_ref() != Ok(&v) {
            panic!("Tried encoding\n {:?}\n as \n{:?}\n got \n{:?}\n", v, enc, dec)
        }
    }

    #[test]
    fn encode_decode_tagged_ints(v in arb_value()) {
        for opts in all_options() {
            let enc = encode_with(&v, &opts);
            let dec = decode_with(&enc, &opts);
            prop_assert_eq!(dec, Ok(v.clone()), "options {:?}, encoded {:?}", opts, enc);
        }
    }

    #[test]
    fn floats(f in arb_f64()) {
        let dec = decode(&encode(&Value::Float(f))).unwrap();
        match dec {
            Value::Float(g) => prop_assert!(g == f || (g.is_nan() && f.is_nan())),
            other => panic!("expected a float, got {:?}", other),
        }
    }

    #[test]
    fn ints_come_back_as_floats(i in any::<i64>()) {
        let dec = decode(&encode(&Value::from(i))).unwrap();
        prop_assert_eq!(dec, Value::Float(i as f64));
    }

    #[test]
    fn text_is_verbatim(s in arb_text()) {
        let enc = encode(&Value::from(s.as_str()));
        prop_assert_eq!(&enc[1..], s.as_str());
        prop_assert_eq!(decode(&enc).unwrap(), Value::Text(s));
    }

    #[test]
    fn decode_never_panics(s in "[0-9:LDSNBFITsf-]{0,24}") {
        // anything may come back, as long as it is a value or an error
        let _ = decode(&s);
    }
}
