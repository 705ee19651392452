use num_bigint::BigInt;
use num_traits::Num;
use proptest::prelude::*;
use repy_serial::{vecmap::VecMap, Value};

/// arbitrary BigInt outside the `i64` range, for use with proptest
pub fn arb_bigint() -> impl Strategy<Value = BigInt> {
    "-?1[0-1]{63,80}".prop_map(|n| -> BigInt { BigInt::from_str_radix(&n, 2).unwrap() })
}

/// arbitrary text for use with proptest, weighted towards characters the format
/// itself uses
pub fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<String>(),
        "[0-9:LDSNBFITsf]{0,12}",
        Just(String::new()),
    ]
}

/// arbitrary floats, including the non-finite ones
pub fn arb_f64() -> impl Strategy<Value = f64> {
    prop_oneof![
        any::<f64>(),
        Just(0.0),
        Just(-0.0),
        Just(std::f64::INFINITY),
        Just(std::f64::NEG_INFINITY),
        Just(std::f64::NAN),
        (-1_000_000i64..1_000_000).prop_map(|i| i as f64),
    ]
}

fn arb_tree(leaf: BoxedStrategy<Value>) -> impl Strategy<Value = Value> {
    leaf.prop_recursive(
        8,  // max depth
        64, // max nodes
        10, // max items per collection
        |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..10).prop_map(Value::Seq),
                prop::collection::vec((inner.clone(), inner), 0..10)
                    .prop_map(|pairs| Value::Map(VecMap::from(pairs)))
            ]
        },
    )
}

/// arbitrary values without integers, for use with proptest
pub fn arb_value_no_int() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        arb_f64().prop_map(Value::Float),
        arb_text().prop_map(Value::Text),
    ];
    arb_tree(leaf.boxed())
}

/// arbitrary values for use with proptest
pub fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        // integers
        any::<i8>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        any::<u64>().prop_map(Value::from),
        any::<i128>().prop_map(Value::from),
        arb_bigint().prop_map(Value::from),
        // floats
        arb_f64().prop_map(Value::Float),
        // text
        arb_text().prop_map(Value::Text),
    ];
    arb_tree(leaf.boxed())
}
