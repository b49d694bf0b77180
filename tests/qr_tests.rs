#[cfg(test)]
mod qr_proptests {

    use prop::string::string_regex;
    use proptest::prelude::*;

    use qrgen::*;

    pub fn ec_level_strategy() -> BoxedStrategy<ECLevel> {
        prop_oneof![Just(ECLevel::L), Just(ECLevel::M), Just(ECLevel::Q), Just(ECLevel::H)].boxed()
    }

    pub fn qr_strategy(regex: &'static str) -> impl Strategy<Value = (ECLevel, String)> {
        ec_level_strategy().prop_flat_map(move |ecl| {
            let pattern = format!(r"{}{{0,120}}", regex);
            string_regex(&pattern).unwrap().prop_map(move |data| (ecl, data))
        })
    }

    fn scan(qr: &QR) -> String {
        let scale = 4;
        let qz = 4;
        let side = (qr.size() as i32 + 2 * qz) * scale;
        let mut img = rqrr::PreparedImage::prepare_from_greyscale(
            side as usize,
            side as usize,
            |x, y| {
                let x = x as i32 / scale - qz;
                let y = y as i32 / scale - qz;
                if qr.module(x, y) {
                    0
                } else {
                    255
                }
            },
        );
        let grids = img.detect_grids();
        assert_eq!(grids.len(), 1, "Expected exactly one symbol");
        let (meta, content) = grids[0].decode().expect("Failed to read QR");
        assert_eq!(meta.version.0, *qr.version());
        content
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn proptest_numeric(params in qr_strategy("[0-9]")) {
            let (ecl, data) = params;
            let qr = QRBuilder::new(data.as_bytes()).ec_level(ecl).build().unwrap();
            prop_assert!(qr.ec_level() >= ecl);
            prop_assert_eq!(scan(&qr), data);
        }

        #[test]
        fn proptest_alphanumeric(params in qr_strategy(r"[0-9A-Z $%*+\-./:]")) {
            let (ecl, data) = params;
            let qr = QRBuilder::new(data.as_bytes()).ec_level(ecl).build().unwrap();
            prop_assert_eq!(scan(&qr), data);
        }

        #[test]
        fn proptest_byte(params in qr_strategy("[a-z0-9,!? ]")) {
            let (ecl, data) = params;
            let qr = QRBuilder::new(data.as_bytes()).ec_level(ecl).build().unwrap();
            prop_assert_eq!(scan(&qr), data);
        }
    }

    #[test]
    fn test_scan_large() {
        let data = "The quick brown fox jumps over the lazy dog. ".repeat(10);
        let qr = encode_text(&data).unwrap();
        assert_eq!(*qr.version(), 14);
        assert_eq!(scan(&qr), data);
    }

    #[test]
    fn test_scan_every_mask() {
        for m in MaskPattern::all() {
            let qr = QRBuilder::new(b"MASK TEST 0123").mask(m).build().unwrap();
            assert_eq!(scan(&qr), "MASK TEST 0123", "Mask {}", *m);
        }
    }
}

#[cfg(test)]
mod qr_tests {
    use test_case::test_case;

    use qrgen::{
        encode_binary, encode_segments, encode_text, make_segments, ECLevel, MaskPattern, Mode,
        QRBuilder, QRError, Segment, Version,
    };

    #[test]
    fn test_hello_world() {
        let qr = encode_text("HELLO WORLD").unwrap();
        assert_eq!(*qr.version(), 1);
        assert_eq!(qr.size(), 21);
        assert_eq!(qr.ec_level(), ECLevel::Q);
        assert_eq!(*qr.mask(), 6);
        for i in -5..26 {
            for j in [-5, -1, 21, 25] {
                assert!(!qr.module(i, j));
                assert!(!qr.module(j, i));
            }
        }
        // Finder corners are dark
        assert!(qr.module(0, 0));
        assert!(qr.module(20, 0));
        assert!(qr.module(0, 20));
        // Dark module
        assert!(qr.module(8, 13));
    }

    #[test]
    fn test_empty_text() {
        let qr = encode_text("").unwrap();
        assert_eq!(*qr.version(), 1);
        assert_eq!(qr.ec_level(), ECLevel::H);
        assert_eq!(*qr.mask(), 6);

        // No segments at all: terminator, then nothing but padding codewords
        let exp = encode_segments(&[], ECLevel::H, Version::MIN, Version::MIN, None, false).unwrap();
        assert_eq!(qr.mask(), exp.mask());
        for y in 0..21 {
            for x in 0..21 {
                assert_eq!(qr.module(x, y), exp.module(x, y), "Module ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_encode_binary() {
        let data = [0x00, 0xFF, 0x10, 0x80];
        let qr = encode_binary(&data).unwrap();
        let exp = encode_segments(
            &[Segment::bytes(&data).unwrap()],
            ECLevel::L,
            Version::MIN,
            Version::MAX,
            None,
            true,
        )
        .unwrap();
        assert_eq!(qr.version(), exp.version());
        for y in 0..21 {
            for x in 0..21 {
                assert_eq!(qr.module(x, y), exp.module(x, y));
            }
        }
    }

    #[test_case("0123456789", Mode::Numeric)]
    #[test_case("HELLO WORLD", Mode::Alphanumeric)]
    #[test_case("Hello, world!", Mode::Byte)]
    fn test_mode_selection(text: &str, mode: Mode) {
        let segs = make_segments(text).unwrap();
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].mode(), mode);
    }

    #[test]
    fn test_data_too_long() {
        let data = vec![0u8; 2954];
        assert_eq!(encode_binary(&data).err(), Some(QRError::DataTooLong));

        let data = vec![0u8; 2953];
        let qr = encode_binary(&data).unwrap();
        assert_eq!(*qr.version(), 40);
        assert_eq!(qr.size(), 177);
    }

    #[test]
    fn test_version_bounds() {
        let segs = make_segments("HELLO WORLD").unwrap();
        let min = Version::new(3).unwrap();
        let max = Version::new(5).unwrap();
        let qr = encode_segments(&segs, ECLevel::L, min, max, None, true).unwrap();
        assert_eq!(qr.version(), min);
        assert_eq!(qr.ec_level(), ECLevel::H);

        let res = encode_segments(&segs, ECLevel::L, max, min, None, true);
        assert_eq!(res.err(), Some(QRError::InvalidVersionRange { min: 5, max: 3 }));
    }

    #[test]
    fn test_invalid_arguments() {
        assert_eq!(Version::new(0).err(), Some(QRError::InvalidVersion(0)));
        assert_eq!(Version::new(41).err(), Some(QRError::InvalidVersion(41)));
        assert_eq!(MaskPattern::new(8).err(), Some(QRError::InvalidMaskingPattern(8)));
        assert_eq!(Segment::numeric("12a").err(), Some(QRError::InvalidChar('a')));
        assert_eq!(Segment::alphanumeric("abc").err(), Some(QRError::InvalidChar('a')));
    }

    #[test]
    fn test_deterministic() {
        let a = QRBuilder::new(b"Deterministic output").build().unwrap();
        let b = QRBuilder::new(b"Deterministic output").build().unwrap();
        assert_eq!(a.mask(), b.mask());
        let w = a.size() as i32;
        for y in 0..w {
            for x in 0..w {
                assert_eq!(a.module(x, y), b.module(x, y));
            }
        }
    }

    #[test]
    fn test_metadata() {
        let qr = QRBuilder::new(b"HELLO WORLD").build().unwrap();
        assert_eq!(qr.metadata().to_string(), "{ Version: 1, Ec level: Q, Mask: 6 }");
    }

    #[test]
    fn test_with_subscriber() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("qrgen=trace")
            .with_test_writer()
            .try_init();
        let qr = QRBuilder::new(b"https://example.com/?q=1").eci(26).build().unwrap();
        assert!(qr.penalty() > 0);
        assert!(qr.count_dark_modules() > 0);
    }
}
