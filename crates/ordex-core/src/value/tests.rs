use super::{
    Collation, Datum, Decimal, DecimalParts, Float64, Scalar, Value, ValueType, cmp_int_uint,
    compare_under_type,
};
use std::cmp::Ordering;

#[test]
fn integer_family_compares_across_variants() {
    let cmp = |left: &Value, right: &Value| {
        compare_under_type(ValueType::Int, Collation::Binary, left, right)
            .expect("integer family should compare")
    };

    assert_eq!(cmp(&Value::Int(-1), &Value::Uint(0)), Ordering::Less);
    assert_eq!(cmp(&Value::Uint(0), &Value::Int(-1)), Ordering::Greater);
    assert_eq!(cmp(&Value::Int(42), &Value::Uint(42)), Ordering::Equal);
    assert_eq!(
        cmp(&Value::Int(i64::MAX), &Value::Uint(i64::MAX as u64 + 1)),
        Ordering::Less
    );
}

#[test]
fn cmp_int_uint_handles_the_sign_boundary() {
    assert_eq!(cmp_int_uint(-1, 0), Ordering::Less);
    assert_eq!(cmp_int_uint(0, 0), Ordering::Equal);
    assert_eq!(cmp_int_uint(1, 0), Ordering::Greater);
    assert_eq!(cmp_int_uint(i64::MAX, u64::MAX), Ordering::Less);
}

#[test]
fn text_comparison_respects_collation() {
    let upper = Value::Text("Rust".to_string());
    let lower = Value::Text("rust".to_string());

    assert_eq!(
        compare_under_type(ValueType::Text, Collation::Binary, &upper, &lower),
        Some(Ordering::Less)
    );
    assert_eq!(
        compare_under_type(ValueType::Text, Collation::CaseFold, &upper, &lower),
        Some(Ordering::Equal)
    );
}

#[test]
fn mismatched_variants_yield_no_ordering() {
    let text = Value::Text("seven".to_string());

    assert_eq!(
        compare_under_type(ValueType::Int, Collation::Binary, &text, &Value::Int(7)),
        None
    );
    assert_eq!(
        compare_under_type(ValueType::Bool, Collation::Binary, &Value::Int(1), &Value::Bool(true)),
        None
    );
}

#[test]
fn float_total_order_keeps_negative_zero_below_positive_zero() {
    let negative_zero = Float64::try_new(-0.0).expect("-0.0 is finite");
    let positive_zero = Float64::try_new(0.0).expect("0.0 is finite");
    assert_eq!(negative_zero.cmp(&positive_zero), Ordering::Less);

    let negative_infinity = Float64::try_new(f64::NEG_INFINITY).expect("-inf is not NaN");
    let positive_infinity = Float64::try_new(f64::INFINITY).expect("+inf is not NaN");
    assert!(negative_infinity < negative_zero);
    assert!(positive_zero < positive_infinity);

    assert_eq!(Float64::try_new(f64::NAN), None);
    assert_eq!(Value::float(f64::NAN), None);
}

#[test]
fn decimal_parts_round_trip_and_normalize() {
    let padded = Decimal::new(1200, 2); // 12.00
    assert_eq!(
        padded.normalize().parts(),
        DecimalParts {
            mantissa: 12,
            scale: 0
        }
    );

    let parts = padded.parts();
    assert_eq!(Decimal::from_parts(parts), Some(padded));

    let too_fine = DecimalParts {
        mantissa: 1,
        scale: Decimal::max_supported_scale() + 1,
    };
    assert_eq!(Decimal::from_parts(too_fine), None);
}

#[test]
fn scalar_compare_is_collation_aware_and_variant_strict() {
    assert_eq!(
        Scalar::compare(
            Collation::CaseFold,
            &Scalar::Text("Alpha".to_string()),
            &Scalar::Text("alpha".to_string()),
        ),
        Some(Ordering::Equal)
    );
    assert_eq!(
        Scalar::compare(Collation::Binary, &Scalar::Int(-3), &Scalar::Uint(3)),
        Some(Ordering::Less)
    );
    assert_eq!(
        Scalar::compare(Collation::Binary, &Scalar::Bool(true), &Scalar::Int(1)),
        None
    );
}

#[test]
fn datum_wraps_null_and_scalars() {
    assert!(Datum::NULL.is_null());
    assert_eq!(Datum::NULL.scalar(), None);

    let datum = Datum::int(5);
    assert!(!datum.is_null());
    assert_eq!(datum.scalar(), Some(&Scalar::Int(5)));
    assert_eq!(
        Datum::text("name").scalar(),
        Some(&Scalar::Text("name".to_string()))
    );

    assert_eq!(Datum::float(f64::NAN), None);
}
