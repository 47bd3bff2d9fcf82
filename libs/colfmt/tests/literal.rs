use colfmt::dialect::literal;
use colfmt::{FormatError, StructField, Type, TypedValue};
use rstest::rstest;
use serde_json::{Value, json};

fn tv(ty: Type, value: Value) -> TypedValue {
    TypedValue::new(ty, value)
}

#[rstest]
#[case::bool_true(Type::Bool, json!(true), "true")]
#[case::int64(Type::Int64, json!("-42"), "-42")]
#[case::int64_plain_number(Type::Int64, json!(7), "7")]
#[case::string(Type::String, json!("foo"), r#""foo""#)]
#[case::string_with_double_quote(Type::String, json!(r#"foo"bar"#), r#"'foo"bar'"#)]
#[case::string_with_both_quotes(Type::String, json!(r#"a"b'c"#), r#""a\"b'c""#)]
#[case::string_control_chars(Type::String, json!("a\nb\u{7f}"), r#""a\nb\x7f""#)]
#[case::string_unicode_kept(Type::String, json!("héllo"), r#""héllo""#)]
#[case::bytes(Type::Bytes, json!("YWJjAag="), r#"b"abc\x01\xa0""#)]
#[case::timestamp(Type::Timestamp, json!("2018-01-23T03:00:00Z"), r#"TIMESTAMP "2018-01-23T03:00:00Z""#)]
#[case::timestamp_offset(Type::Timestamp, json!("2018-01-23T12:00:00.500+09:00"), r#"TIMESTAMP "2018-01-23T03:00:00.5Z""#)]
#[case::date(Type::Date, json!("2018-01-23"), r#"DATE "2018-01-23""#)]
#[case::numeric(Type::Numeric, json!("1234.56789"), r#"NUMERIC "1234.567890000""#)]
#[case::json_object(Type::Json, json!(r#"{"msg":"foo"}"#), r#"JSON '{"msg":"foo"}'"#)]
#[case::json_null_document(Type::Json, json!("null"), r#"JSON "null""#)]
#[case::json_escaped(Type::Json, json!(r#"{"msg":"\"foo\""}"#), r#"JSON '{"msg":"\\"foo\\""}'"#)]
#[case::json_big_integer(Type::Json, json!(r#"{"n":12345678901234567890123}"#), r#"JSON '{"n":12345678901234567890123}'"#)]
#[case::json_number_text_kept(Type::Json, json!("[1.0,1e21]"), r#"JSON "[1.0,1e21]""#)]
#[case::interval(Type::Interval, json!("P1Y1M1DT1H1M1S"), r#"CAST("P1Y1M1DT1H1M1S" AS INTERVAL)"#)]
#[case::uuid(
    Type::Uuid,
    json!("858e4d4b-8b1a-4a4b-a2a8-5b2c4c5f1c3e"),
    r#"CAST("858e4d4b-8b1a-4a4b-a2a8-5b2c4c5f1c3e" AS UUID)"#
)]
#[case::proto(Type::proto("package.ProtoType"), json!("ZGVhZGJlZWY="), r#"CAST(b"deadbeef" AS `package.ProtoType`)"#)]
#[case::enumeration(Type::enumeration("package.EnumType"), json!("42"), "CAST(42 AS `package.EnumType`)")]
#[case::float64_max(Type::Float64, json!(f64::MAX), "1.7976931348623157e+308")]
#[case::float64_min_subnormal(Type::Float64, json!(5e-324), "5e-324")]
#[case::float64_plain(Type::Float64, json!(0.5), "0.5")]
#[case::float64_from_long_text(
    Type::Float64,
    serde_json::from_str::<Value>("1.0715660391465826e-75").unwrap(),
    "1.0715660391465826e-75"
)]
#[case::timestamp_leap_second(Type::Timestamp, json!("2016-12-31T23:59:60.5Z"), r#"TIMESTAMP "2016-12-31T23:59:60.5Z""#)]
#[case::float64_nan(Type::Float64, json!("NaN"), "CAST('nan' AS FLOAT64)")]
#[case::float64_inf(Type::Float64, json!("Infinity"), "CAST('inf' AS FLOAT64)")]
#[case::float32(Type::Float32, json!(1.5), "CAST(1.5 AS FLOAT32)")]
fn scalars(#[case] ty: Type, #[case] value: Value, #[case] expected: &str) {
    assert_eq!(literal::format_column(&tv(ty, value)).unwrap(), expected);
}

#[rstest]
#[case::bool(Type::Bool)]
#[case::int64(Type::Int64)]
#[case::float32(Type::Float32)]
#[case::float64(Type::Float64)]
#[case::string(Type::String)]
#[case::bytes(Type::Bytes)]
#[case::date(Type::Date)]
#[case::timestamp(Type::Timestamp)]
#[case::numeric(Type::Numeric)]
#[case::json(Type::Json)]
#[case::interval(Type::Interval)]
#[case::uuid(Type::Uuid)]
#[case::proto(Type::proto("package.ProtoType"))]
#[case::enumeration(Type::enumeration("package.EnumType"))]
fn nulls(#[case] ty: Type) {
    assert_eq!(literal::format_column(&tv(ty.clone(), Value::Null)).unwrap(), "NULL");

    // Same inside an array and a struct field.
    let arr = tv(Type::array(ty.clone()), json!([null]));
    assert_eq!(literal::format_column(&arr).unwrap(), "[NULL]");
    let st = Type::structure(vec![StructField::unnamed(ty)]);
    let nested = tv(Type::array(st), json!([[null]]));
    assert!(literal::format_column(&nested).unwrap().ends_with("[(NULL)]"));
}

#[test]
fn null_array() {
    assert_eq!(literal::format_column(&tv(Type::array(Type::Int64), Value::Null)).unwrap(), "NULL");
    let nested = tv(Type::array(Type::array(Type::Int64)), json!([null]));
    assert_eq!(literal::format_column(&nested).unwrap(), "ARRAY<ARRAY<INT64>>[NULL]");
}

#[test]
fn bytes_array_picks_quotes_per_element() {
    let v = tv(Type::array(Type::Bytes), json!(["ImFiYyI=", "J2RlZic="]));
    assert_eq!(literal::format_column(&v).unwrap(), r#"[b'"abc"', b"'def'"]"#);
}

#[test]
fn array_with_null_element() {
    let v = tv(Type::array(Type::Int64), json!(["1", null, "3"]));
    assert_eq!(literal::format_column(&v).unwrap(), "[1, NULL, 3]");
}

#[test]
fn struct_is_annotated_only_at_toplevel() {
    let st = Type::structure(vec![
        StructField::unnamed(Type::Int64),
        StructField::unnamed(Type::String),
        StructField::unnamed(Type::Float64),
    ]);
    let v = tv(st.clone(), json!(["1", "foo", 2.5]));
    assert_eq!(literal::format_column(&v).unwrap(), r#"STRUCT<INT64, STRING, FLOAT64>(1, "foo", 2.5)"#);

    let arr = tv(Type::array(st), json!([["1", "foo", 2.5], ["2", null, null]]));
    assert_eq!(
        literal::format_column(&arr).unwrap(),
        r#"ARRAY<STRUCT<INT64, STRING, FLOAT64>>[(1, "foo", 2.5), (2, NULL, NULL)]"#
    );
}

#[test]
fn named_struct_fields_show_up_in_the_type_only() {
    let st = Type::structure(vec![
        StructField::new("id", Type::Int64),
        StructField::new("tags", Type::array(Type::String)),
    ]);
    let v = tv(st, json!(["7", ["a", "b"]]));
    assert_eq!(literal::format_column(&v).unwrap(), r#"STRUCT<id INT64, tags ARRAY<STRING>>(7, ["a", "b"])"#);
}

#[test]
fn nested_arrays() {
    let v = tv(Type::array(Type::array(Type::Int64)), json!([["1"], [], null]));
    assert_eq!(literal::format_column(&v).unwrap(), "ARRAY<ARRAY<INT64>>[[1], [], NULL]");
}

#[test]
fn empty_struct() {
    let v = tv(Type::structure(vec![]), json!([]));
    assert_eq!(literal::format_column(&v).unwrap(), "STRUCT<>()");
}

#[test]
fn proto_inside_array_is_cast_too() {
    let v = tv(Type::array(Type::proto("p.M")), json!(["ZGVhZGJlZWY=", null]));
    assert_eq!(literal::format_column(&v).unwrap(), "[CAST(b\"deadbeef\" AS `p.M`), NULL]");
}

#[test]
fn decode_failures_surface() {
    let err = literal::format_column(&tv(Type::Int64, json!("forty-two"))).unwrap_err();
    assert!(matches!(err, FormatError::Decode { ref ty, .. } if ty == "INT64"), "{err:?}");

    let err = literal::format_column(&tv(Type::array(Type::Int64), json!("1"))).unwrap_err();
    assert!(matches!(err, FormatError::Decode { .. }), "{err:?}");

    let st = Type::structure(vec![StructField::unnamed(Type::Int64)]);
    let err = literal::format_column(&tv(st, json!(["1", "2"]))).unwrap_err();
    assert!(matches!(err, FormatError::Decode { .. }), "{err:?}");
}

#[test]
fn unknown_type_code_fails() {
    let v: TypedValue = serde_json::from_value(json!({"type": {"code": "GEOGRAPHY"}, "value": "POINT(0 0)"})).unwrap();
    assert_eq!(v.ty, Type::Unspecified);
    let err = literal::format_column(&v).unwrap_err();
    assert!(matches!(err, FormatError::UnknownType(_)), "{err:?}");
}

#[test]
fn long_escape_strings() {
    let all_bytes: Vec<u8> = (0..=255u8).collect();
    let v = colfmt::ctor::bytes_value(&all_bytes);
    let got = literal::format_column(&v).unwrap();
    assert!(got.starts_with(r#"b"\x00\x01"#), "{got}");
    assert!(got.contains(r##" !\"#$%&'()"##), "{got}");
    assert!(got.contains(r#"[\\]^_`"#), "{got}");
    assert!(got.ends_with(r#"\xfe\xff""#), "{got}");
}
