// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/spkenv/spk

use proptest::prelude::*;
use rstest::rstest;

use super::{Hash, compress_hash, new_hash_allow_empty};
use crate::{Algorithm, HashFormat, codec, hash_string};

const SHA256_EMPTY: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
const SHA256_ABC: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";
const SHA256_ABC_NIX32: &str = "1b8m03r63zqhnjf7l5wnldhh7c134ap5vpj0850ymkq1iyzicy5s";

fn hash_from_hex(algorithm: Algorithm, base16: &str) -> Hash {
    let bytes = codec::decode_base16(base16).expect("valid test vector");
    Hash::from_slice(algorithm, &bytes).expect("test vector has the right length")
}

#[rstest]
fn test_sha256_known_values() {
    assert_eq!(hash_string(Algorithm::Sha256, "").git_rev(), SHA256_EMPTY);
    let abc = hash_string(Algorithm::Sha256, "abc");
    assert_eq!(abc.encode(HashFormat::Base16, false), SHA256_ABC);
    assert_eq!(abc.encode(HashFormat::Nix32, false), SHA256_ABC_NIX32);
}

#[rstest]
fn test_md5_sri() {
    let hash = hash_string(Algorithm::Md5, "abc");
    assert_eq!(hash.encode(HashFormat::Sri, false), "md5-kAFQmDzST7DWlj99KOF/cg==");
    assert_eq!(hash.encode(HashFormat::Sri, true), "md5-kAFQmDzST7DWlj99KOF/cg==");
}

#[rstest]
fn test_parse_nix32_reprint_base16() {
    let hash = Hash::parse_any(&format!("sha256:{SHA256_ABC_NIX32}"), None).unwrap();
    assert_eq!(hash.encode(HashFormat::Base16, false), SHA256_ABC);
}

#[rstest]
#[case::md5_empty(Algorithm::Md5, "", "d41d8cd98f00b204e9800998ecf8427e", "3y8bwfr609h3lh9ch0izcqq7fl", "1B2M2Y8AsgTpgAmY7PhCfg==")]
#[case::md5_abc(Algorithm::Md5, "abc", "900150983cd24fb0d6963f7d28e17f72", "3jgzhjhz9zjvbb0kyj7jc500ch", "kAFQmDzST7DWlj99KOF/cg==")]
#[case::sha1_empty(Algorithm::Sha1, "", "da39a3ee5e6b4b0d3255bfef95601890afd80709", "143xibwh31h9bvxzalr0sjvbbvpa6ffs", "2jmj7l5rSw0yVb/vlWAYkK/YBwk=")]
#[case::sha1_abc(Algorithm::Sha1, "abc", "a9993e364706816aba3e25717850c26c9cd0d89d", "kpcd173cq987hw957sx6m0868wv3x6d9", "qZk+NkcGgWq6PiVxeFDCbJzQ2J0=")]
#[case::sha256_empty(Algorithm::Sha256, "", SHA256_EMPTY, "0mdqa9w1p6cmli6976v4wi0sw9r4p5prkj7lzfd1877wk11c9c73", "47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU=")]
#[case::sha256_abc(Algorithm::Sha256, "abc", SHA256_ABC, SHA256_ABC_NIX32, "ungWv48Bz+pBQUDeXa4iI7ADYaOWF3qctBD/YfIAFa0=")]
#[case::sha512_abc(Algorithm::Sha512, "abc", "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f", "2gs8k559z4rlahfx0y688s49m2vvszylcikrfinm30ly9rak69236nkam5ydvly1ai7xac99vxfc4ii84hawjbk876blyk1jfhkbbyx", "3a81oZNherrMQXNJriBBMRLm+k6JqX6iCp7u5ktV05ohkpkqJ0/BqDa6PCOj/uu9RU1EI2Q86A4qmslPpUyknw==")]
fn test_encode_and_parse(
    #[case] algorithm: Algorithm,
    #[case] input: &str,
    #[case] base16: &str,
    #[case] nix32: &str,
    #[case] base64: &str,
) {
    let hash = hash_string(algorithm, input);
    assert_eq!(hash, hash_from_hex(algorithm, base16));

    assert_eq!(hash.encode(HashFormat::Base16, false), base16);
    assert_eq!(hash.encode(HashFormat::Nix32, false), nix32);
    assert_eq!(hash.encode(HashFormat::Base64, false), base64);
    assert_eq!(hash.encode(HashFormat::Base16, true), format!("{algorithm}:{base16}"));
    assert_eq!(hash.encode(HashFormat::Nix32, true), format!("{algorithm}:{nix32}"));
    assert_eq!(hash.encode(HashFormat::Base64, true), format!("{algorithm}:{base64}"));
    assert_eq!(hash.encode(HashFormat::Sri, true), format!("{algorithm}-{base64}"));
    assert_eq!(hash.to_string(), format!("{algorithm}:{nix32}"));
    assert_eq!(format!("{hash:#}"), nix32);

    for body in [base16, nix32, base64] {
        let prefixed = format!("{algorithm}:{body}");
        assert_eq!(Hash::parse_any(&prefixed, None).unwrap(), hash);
        assert_eq!(Hash::parse_any(&prefixed, Some(algorithm)).unwrap(), hash);
        assert_eq!(Hash::parse_any(body, Some(algorithm)).unwrap(), hash);
        assert_eq!(Hash::parse_any_prefixed(&prefixed).unwrap(), hash);
        assert_eq!(Hash::parse_non_sri_prefixed(&prefixed).unwrap(), hash);
        assert_eq!(Hash::parse_non_sri_unprefixed(body, algorithm).unwrap(), hash);
        assert_eq!(prefixed.parse::<Hash>().unwrap(), hash);
    }

    let sri = format!("{algorithm}-{base64}");
    assert_eq!(Hash::parse_sri(&sri).unwrap(), hash);
    assert_eq!(Hash::parse_any(&sri, None).unwrap(), hash);
    assert_eq!(Hash::parse_any(&sri, Some(algorithm)).unwrap(), hash);
    assert_eq!(Hash::parse_any_prefixed(&sri).unwrap(), hash);
}

#[rstest]
#[case::unknown_algorithm("sha384:abcd", None)]
#[case::uppercase_algorithm("SHA256:1b8m03r63zqhnjf7l5wnldhh7c134ap5vpj0850ymkq1iyzicy5s", None)]
#[case::missing_type("1b8m03r63zqhnjf7l5wnldhh7c134ap5vpj0850ymkq1iyzicy5s", None)]
#[case::type_mismatch("sha1:kpcd173cq987hw957sx6m0868wv3x6d9", Some(Algorithm::Sha256))]
#[case::wrong_length("sha1:12345", None)]
#[case::empty_body("sha256:", None)]
#[case::empty("", Some(Algorithm::Sha256))]
#[case::uppercase_base16("sha1:A9993E364706816ABA3E25717850C26C9CD0D89D", None)]
#[case::bad_base16("sha1:k9993e364706816aba3e25717850c26c9cd0d89d", None)]
#[case::bad_nix32("sha1:!pcd173cq987hw957sx6m0868wv3x6d9", None)]
#[case::bad_base64_symbol("sha1:!Zk+NkcGgWq6PiVxeFDCbJzQ2J0=", None)]
#[case::base64_wrong_size("sha1:qZk+NkcGgWq6PiVxeFDCbJzQ2J0a", None)]
#[case::short_sri("sha1-qZk+NkcGgWq6PiVxeFDCbJzQ", None)]
#[case::sri_wrong_size("sha1-ungWv48Bz+pBQUDeXa4iI7ADYaOWF3qctBD/YfIAFa0=", None)]
#[case::sri_with_base16("sha1-a9993e364706816aba3e25717850c26c9cd0d89d", None)]
fn test_parse_any_errors(#[case] input: &str, #[case] algorithm: Option<Algorithm>) {
    let err = Hash::parse_any(input, algorithm).expect_err("should fail to parse");
    assert!(err.is_bad_hash(), "expected a bad hash error, got {err:?}");
}

#[rstest]
fn test_parse_any_prefixed_requires_prefix() {
    let err = Hash::parse_any_prefixed(SHA256_ABC).expect_err("no prefix");
    assert!(err.is_bad_hash());
}

#[rstest]
fn test_parse_sri_rejects_other_forms() {
    let hash = hash_string(Algorithm::Sha256, "abc");
    for format in [HashFormat::Base16, HashFormat::Nix32, HashFormat::Base64] {
        let encoded = hash.encode(format, true);
        assert!(
            Hash::parse_sri(&encoded).is_err(),
            "{encoded} should not parse as SRI"
        );
    }
    assert!(Hash::parse_sri(SHA256_ABC).is_err());
}

#[rstest]
fn test_parse_non_sri_unprefixed_rejects_sri() {
    let hash = hash_string(Algorithm::Sha256, "abc");
    let sri = hash.encode(HashFormat::Sri, true);
    assert!(Hash::parse_non_sri_unprefixed(&sri, Algorithm::Sha256).is_err());
    assert!(Hash::parse_non_sri_prefixed(&sri).is_err());
}

#[rstest]
fn test_from_slice_wrong_length() {
    let err = Hash::from_slice(Algorithm::Sha1, &[0; 32]).expect_err("wrong length");
    assert!(err.is_bad_hash());
}

#[rstest]
#[case(Algorithm::Md5)]
#[case(Algorithm::Sha1)]
#[case(Algorithm::Sha256)]
#[case(Algorithm::Sha512)]
fn test_zero_hash(#[case] algorithm: Algorithm) {
    let zero = Hash::new(algorithm);
    assert!(zero.is_zero());
    assert_eq!(zero.as_bytes().len(), algorithm.size());
    assert_eq!(zero.git_rev(), "0".repeat(algorithm.base16_len()));
    assert_eq!(
        zero.encode(HashFormat::Nix32, false),
        "0".repeat(algorithm.base32_len())
    );
    let reparsed = Hash::parse_any(&zero.encode(HashFormat::Base64, true), None).unwrap();
    assert_eq!(reparsed, zero);
    assert_ne!(zero, hash_string(algorithm, ""));
}

#[rstest]
fn test_default_hash_is_zero_sha256() {
    assert_eq!(Hash::default(), Hash::new(Algorithm::Sha256));
}

#[rstest]
fn test_new_hash_allow_empty() {
    let zero = new_hash_allow_empty("", Some(Algorithm::Sha1)).unwrap();
    assert_eq!(zero, Hash::new(Algorithm::Sha1));

    let err = new_hash_allow_empty("", None).expect_err("type is required");
    assert!(err.is_bad_hash());

    let parsed = new_hash_allow_empty(SHA256_ABC, Some(Algorithm::Sha256)).unwrap();
    assert_eq!(parsed, hash_string(Algorithm::Sha256, "abc"));
}

#[rstest]
fn test_equality_requires_same_algorithm() {
    let sha256 = Hash::new(Algorithm::Sha256);
    let sha512 = Hash::new(Algorithm::Sha512);
    assert_ne!(sha256, sha512, "zero hashes of different algorithms differ");
}

#[rstest]
fn test_ordering() {
    let md5_high = Hash::from_slice(Algorithm::Md5, &[0xff; 16]).unwrap();
    let sha1_low = Hash::new(Algorithm::Sha1);
    assert!(md5_high < sha1_low, "algorithm is compared first");

    let mut low = [0u8; 32];
    low[31] = 1;
    let mut high = [0u8; 32];
    high[0] = 1;
    let low = Hash::from_slice(Algorithm::Sha256, &low).unwrap();
    let high = Hash::from_slice(Algorithm::Sha256, &high).unwrap();
    assert!(low < high, "digest bytes compare lexicographically");
    assert!(Hash::new(Algorithm::Sha256) < low);
}

#[rstest]
fn test_git_revs() {
    let hash = hash_string(Algorithm::Sha1, "abc");
    assert_eq!(hash.git_rev(), "a9993e364706816aba3e25717850c26c9cd0d89d");
    assert_eq!(hash.git_short_rev(), "a9993e3");
}

#[rstest]
fn test_to_string_16_or_32() {
    let md5 = hash_string(Algorithm::Md5, "abc");
    assert_eq!(md5.to_string_16_or_32(), "900150983cd24fb0d6963f7d28e17f72");
    let sha256 = hash_string(Algorithm::Sha256, "abc");
    assert_eq!(sha256.to_string_16_or_32(), SHA256_ABC_NIX32);
}

#[rstest]
fn test_compress_hash() {
    let hash = hash_string(Algorithm::Sha256, "abc");
    let compressed = compress_hash(&hash, 20);
    assert_eq!(compressed.algorithm(), Algorithm::Sha256);
    assert_eq!(
        codec::encode_base16(compressed.as_bytes()),
        "2c6f6c233b11308bb34155735dae2223b00361a3"
    );
    assert_eq!(compressed.to_string(), "ldhh7c134ap5swsm86rqnc0i7cinqvrc");
    assert_eq!(
        compressed.encode(HashFormat::Base16, true),
        "sha256:2c6f6c233b11308bb34155735dae2223b00361a3"
    );
    assert_eq!(hash.compress(20), compressed, "should be deterministic");
}

#[rstest]
fn test_compress_hash_full_size() {
    let hash = hash_string(Algorithm::Sha256, "abc");
    assert_eq!(compress_hash(&hash, 32).as_bytes(), hash.as_bytes());

    let larger = compress_hash(&hash, 40);
    assert_eq!(&larger[..32], hash.as_bytes());
    assert_eq!(&larger[32..], &[0u8; 8]);
}

#[rstest]
#[should_panic]
fn test_compress_hash_zero_size() {
    compress_hash(&Hash::new(Algorithm::Sha256), 0);
}

#[rstest]
fn test_hash_serde() {
    let hash = hash_string(Algorithm::Sha256, "abc");
    let json = serde_json::to_string(&hash).unwrap();
    assert_eq!(
        json,
        "\"sha256-ungWv48Bz+pBQUDeXa4iI7ADYaOWF3qctBD/YfIAFa0=\""
    );
    let parsed: Hash = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, hash);

    let from_nix32: Hash =
        serde_json::from_str(&format!("\"sha256:{SHA256_ABC_NIX32}\"")).unwrap();
    assert_eq!(from_nix32, hash);

    assert!(serde_json::from_str::<Hash>(&format!("\"{SHA256_ABC}\"")).is_err());
}

#[rstest]
fn test_debug_shows_algorithm_and_digest() {
    let hash = hash_string(Algorithm::Sha256, "abc");
    let debug = format!("{hash:?}");
    assert!(debug.contains("Sha256"), "{debug}");
    assert!(debug.contains(SHA256_ABC_NIX32), "{debug}");
}

prop_compose! {
    fn arb_hash()(
        algorithm in prop::sample::select(Algorithm::ALL.to_vec()),
        bytes in prop::collection::vec(any::<u8>(), crate::MAX_DIGEST_SIZE),
    ) -> Hash {
        Hash::from_slice(algorithm, &bytes[..algorithm.size()]).unwrap()
    }
}

proptest! {
    #[test]
    fn prop_test_prefixed_round_trip(hash in arb_hash()) {
        for format in HashFormat::ALL {
            let encoded = hash.encode(format, true);
            prop_assert_eq!(Hash::parse_any(&encoded, None).unwrap(), hash);
            prop_assert_eq!(Hash::parse_any_prefixed(&encoded).unwrap(), hash);
        }
    }

    #[test]
    fn prop_test_unprefixed_round_trip(hash in arb_hash()) {
        let algorithm = hash.algorithm();
        for format in [HashFormat::Base16, HashFormat::Nix32, HashFormat::Base64] {
            let encoded = hash.encode(format, false);
            let expected_len = match format {
                HashFormat::Base16 => hash.base16_len(),
                HashFormat::Nix32 => hash.base32_len(),
                _ => hash.base64_len(),
            };
            prop_assert_eq!(encoded.len(), expected_len);
            prop_assert_eq!(Hash::parse_any(&encoded, Some(algorithm)).unwrap(), hash);
            prop_assert_eq!(Hash::parse_non_sri_unprefixed(&encoded, algorithm).unwrap(), hash);
            prop_assert!(Hash::parse_sri(&encoded).is_err());
        }
        let sri = hash.encode(HashFormat::Sri, false);
        prop_assert_eq!(Hash::parse_sri(&sri).unwrap(), hash);
        prop_assert!(Hash::parse_non_sri_unprefixed(&sri, algorithm).is_err());
    }

    #[test]
    fn prop_test_ordering_matches_bytes(a in arb_hash(), b in arb_hash()) {
        let expected = a
            .algorithm()
            .cmp(&b.algorithm())
            .then_with(|| a.as_bytes().cmp(b.as_bytes()));
        prop_assert_eq!(a.cmp(&b), expected);
        prop_assert_eq!(a == b, expected.is_eq());
    }

    #[test]
    fn prop_test_compress_is_xor_linear(
        a in prop::collection::vec(any::<u8>(), 32),
        b in prop::collection::vec(any::<u8>(), 32),
        size in 1usize..48,
    ) {
        let xored: Vec<u8> = a.iter().zip(b.iter()).map(|(x, y)| x ^ y).collect();
        let a = Hash::from_slice(Algorithm::Sha256, &a).unwrap();
        let b = Hash::from_slice(Algorithm::Sha256, &b).unwrap();
        let xored = Hash::from_slice(Algorithm::Sha256, &xored).unwrap();

        let left = compress_hash(&xored, size);
        let ca = compress_hash(&a, size);
        let cb = compress_hash(&b, size);
        let right: Vec<u8> = ca.iter().zip(cb.iter()).map(|(x, y)| x ^ y).collect();
        prop_assert_eq!(left.as_bytes(), right.as_slice());
    }
}
