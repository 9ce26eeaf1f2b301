//! Purpose: Lock deserializer contract expectations with corpus coverage.
//! Exports: Integration tests only (no runtime exports).
//! Role: Catch drift in grammar handling across refactors of the parser.
//! Invariants: Every marker type and every malformed-stream class stays
//! represented.
//! Invariants: Malformed streams never yield values, only typed errors.

use bstr::BString;
use routedec::api::{deserialize_roots, ErrorKind, Value};

fn string(text: &str) -> Value {
    Value::String(BString::from(text))
}

fn table(pairs: Vec<(Value, Value)>) -> Value {
    Value::Table(pairs)
}

// Escapes a payload the way the producing serializer does: the marker
// byte is doubled, everything else passes through.
fn escape_payload(payload: &[u8]) -> Vec<u8> {
    let mut escaped = Vec::with_capacity(payload.len());
    for &byte in payload {
        escaped.push(byte);
        if byte == b'^' {
            escaped.push(b'^');
        }
    }
    escaped
}

fn string_stream(payload: &[u8]) -> Vec<u8> {
    let mut stream = b"^S".to_vec();
    stream.extend_from_slice(&escape_payload(payload));
    stream.extend_from_slice(b"^s");
    stream
}

#[test]
fn corpus_valid_streams_reconstruct_expected_trees() {
    let cases: Vec<(&[u8], Vec<Value>)> = vec![
        (b"^Z", vec![Value::Nil]),
        (b"^B", vec![Value::Boolean(true)]),
        (b"^b", vec![Value::Boolean(false)]),
        (b"^N250^n", vec![Value::Number(250.0)]),
        (b"^N-0.5^n", vec![Value::Number(-0.5)]),
        (b"^Sroute^s", vec![string("route")]),
        (b"^T^t", vec![table(Vec::new())]),
        (
            b"^T^Sweek^s^N2^n^t",
            vec![table(vec![(string("week"), Value::Number(2.0))])],
        ),
        (
            b"^T^Sobjects^s^T^N1^n^Snote^s^t^t",
            vec![table(vec![(
                string("objects"),
                table(vec![(Value::Number(1.0), string("note"))]),
            )])],
        ),
        (b"^Z^B^N1^n", vec![
            Value::Nil,
            Value::Boolean(true),
            Value::Number(1.0),
        ]),
    ];

    for (stream, expected) in cases {
        let roots = deserialize_roots(stream).expect("valid stream");
        assert_eq!(roots, expected, "stream: {stream:?}");
    }
}

#[test]
fn corpus_malformed_streams_fail_without_values() {
    let cases: &[&[u8]] = &[
        b"^",
        b"^Q",
        b"^t",
        b"^N1",
        b"^N1^t",
        b"^Nx^n",
        b"^Sabc",
        b"^Sab^Xcd^s",
        b"^T",
        b"^T^Skey^s",
        b"^T^Skey^s^t",
        b"^T^t^t",
        b"^Zx",
        b"plain text",
    ];

    for stream in cases {
        let err = deserialize_roots(stream).expect_err("should fail");
        assert_eq!(err.kind(), ErrorKind::Malformed, "stream: {stream:?}");
        assert!(err.offset().is_some(), "stream: {stream:?}");
    }
}

#[test]
fn escaping_round_trips_payloads_containing_the_marker() {
    let payloads: &[&[u8]] = &[
        b"^",
        b"^^",
        b"a^b",
        b"^leading",
        b"trailing^",
        b"mixed ^ content ^^ here",
        b"\x00\x01binary\xFF^\xFE",
    ];

    for payload in payloads {
        let roots = deserialize_roots(&string_stream(payload)).expect("valid stream");
        assert_eq!(
            roots,
            vec![Value::String(BString::from(*payload))],
            "payload: {payload:?}"
        );
    }
}

#[test]
fn unescaping_is_identity_on_marker_free_payloads() {
    let payload = b"no markers in here, just bytes 123";
    let stream = string_stream(payload);
    // Escaping added nothing, so the payload is stored verbatim.
    assert_eq!(&stream[2..stream.len() - 2], payload);
    let roots = deserialize_roots(&stream).expect("valid stream");
    assert_eq!(roots, vec![Value::String(BString::from(&payload[..]))]);
}

#[test]
fn numeric_text_round_trips_through_f64() {
    let cases: &[(&[u8], f64)] = &[
        (b"^N3.14^n", 3.14),
        (b"^N0^n", 0.0),
        (b"^N-17^n", -17.0),
        (b"^N2.5e10^n", 2.5e10),
        (b"^N0.1^n", 0.1),
        (b"^N9007199254740993^n", 9007199254740992.0),
    ];

    for (stream, expected) in cases {
        let roots = deserialize_roots(stream).expect("valid stream");
        let [Value::Number(actual)] = roots.as_slice() else {
            panic!("expected one number for {stream:?}");
        };
        assert!(
            (actual - expected).abs() <= f64::EPSILON * expected.abs().max(1.0),
            "stream: {stream:?}, actual: {actual}"
        );
    }
}

#[test]
fn pull_shaped_route_tree_round_trips_deeply() {
    // The shape a route planner export actually has: numeric pull keys,
    // string option keys, mixed scalar leaves.
    let stream: &[u8] = b"^T\
^Svalue^s^T\
^Spulls^s^T\
^N1^n^T^Scount^s^N4^n^Scolor^s^S0xFF0000^s^t\
^N2^n^T^Scount^s^N6^n^Sskipped^s^b^t\
^t\
^ScurrentPull^s^N2^n\
^t\
^Sweek^s^N1^n\
^Sdifficulty^s^N10^n\
^t";

    let roots = deserialize_roots(stream).expect("valid stream");
    assert_eq!(roots.len(), 1);
    let root = &roots[0];

    assert_eq!(root.get("week").and_then(Value::as_number), Some(1.0));
    assert_eq!(root.get("difficulty").and_then(Value::as_number), Some(10.0));

    let value = root.get("value").expect("value");
    assert_eq!(value.get("currentPull"), Some(&Value::Number(2.0)));

    let Some(Value::Table(pulls)) = value.get("pulls") else {
        panic!("expected pulls table");
    };
    assert_eq!(pulls.len(), 2);
    assert_eq!(pulls[0].0, Value::Number(1.0));
    assert_eq!(pulls[0].1.get("color"), Some(&string("0xFF0000")));
    assert_eq!(pulls[1].1.get("skipped"), Some(&Value::Boolean(false)));
}
