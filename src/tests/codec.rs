use crate::domain::codec;

#[test]
fn round_trip_preserves_bytes() {
    let cases: Vec<Vec<u8>> = vec![
        vec![],
        vec![0x00],
        b"hello patter".to_vec(),
        vec![0xff, 0x00, 0xab, 0x10, 0x99],
        (0..=255u8).collect(),
    ];

    for bytes in cases {
        let encoded = codec::encode(&bytes);
        assert!(encoded.is_ascii());
        assert_eq!(codec::decode(&encoded).unwrap(), bytes);
    }
}

#[test]
fn round_trip_large_payload() {
    let bytes: Vec<u8> = (0..2 * 1024 * 1024).map(|i| (i * 31 % 251) as u8).collect();

    let encoded = codec::encode(&bytes);
    assert_eq!(codec::decode(&encoded).unwrap(), bytes);
}

#[test]
fn decode_rejects_invalid_characters() {
    assert!(codec::decode("not base64 !!").is_err());
}

#[test]
fn decode_rejects_truncated_input() {
    // One character short of a full block.
    assert!(codec::decode("QUJ").is_err());
}

#[test]
fn encode_is_deterministic() {
    let bytes = b"same input, same wire text";
    assert_eq!(codec::encode(bytes), codec::encode(bytes));
}
