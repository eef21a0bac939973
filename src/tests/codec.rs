use crate::{decode, encode};

#[test]
fn round_trips_ascii() {
    let s = "Hello, World!";
    let code_points = decode(s.as_bytes()).unwrap();
    assert_eq!(code_points, s.chars().map(|c| c as u32).collect::<Vec<_>>());
    assert_eq!(encode(&code_points).unwrap(), s);
}

#[test]
fn round_trips_korean() {
    let s = "안녕하세요";
    let code_points = decode(s.as_bytes()).unwrap();
    assert_eq!(encode(&code_points).unwrap(), s);
}

#[test]
fn round_trips_mixed_script() {
    let s = "Hi 안녕 😀";
    let code_points = decode(s.as_bytes()).unwrap();
    assert_eq!(encode(&code_points).unwrap(), s);
}

#[test]
fn encode_chooses_shortest_form() {
    assert_eq!(encode(&[0x41]).unwrap().len(), 1);
    assert_eq!(encode(&[0x7FF]).unwrap().len(), 2);
    assert_eq!(encode(&[0xFFFF]).unwrap().len(), 3);
    assert_eq!(encode(&[0x10000]).unwrap().len(), 4);
}

#[test]
fn decode_rejects_truncated_sequence() {
    assert!(decode(&[0xE0]).is_err());
    assert!(decode(&[0xC2]).is_err());
}

#[test]
fn decode_rejects_bad_continuation_byte() {
    assert!(decode(&[0xC2, 0x00]).is_err());
}

#[test]
fn decode_accepts_overlong_encoding() {
    // 0xC0 0x80 is the overlong two-byte encoding of NUL; the reference
    // codec accepts it rather than rejecting it.
    let code_points = decode(&[0xC0, 0x80]).unwrap();
    assert_eq!(code_points, vec![0]);
}

#[test]
fn empty_input_round_trips() {
    assert_eq!(decode(&[]).unwrap(), Vec::<u32>::new());
    assert_eq!(encode(&[]).unwrap(), "");
}
