//! Patterned roundtrips, plus BMP conformance-corpus runs (codec-corpus).

use bmpfilters::*;

fn checkerboard(w: u32, h: u32) -> Image {
    let light = Pixel::new(200, 220, 240);
    let dark = Pixel::new(10, 40, 70);
    let pixels = (0..h)
        .flat_map(|y| (0..w).map(move |x| if (x + y) % 2 == 0 { light } else { dark }))
        .collect();
    Image::new(pixels, w, h).unwrap()
}

fn roundtrip(image: &Image) -> Image {
    let mut bitmap = Bitmap::from_image(image.clone()).unwrap();
    let encoded = bitmap.encode(Unstoppable).unwrap();
    decode_bmp(&encoded, Unstoppable).unwrap().image
}

#[test]
fn every_padding_width_roundtrips() {
    // Widths 1..=4 cover padding of 1, 2, 3 and 0 bytes.
    for w in 1..=8 {
        let img = checkerboard(w, 3);
        assert_eq!(roundtrip(&img), img, "width {w}");
    }
}

#[test]
fn single_pixel() {
    let img = Image::filled(1, 1, Pixel::new(1, 2, 3)).unwrap();
    assert_eq!(roundtrip(&img), img);
}

#[test]
fn wide_and_tall() {
    let wide = checkerboard(1001, 2);
    assert_eq!(roundtrip(&wide), wide);
    let tall = checkerboard(2, 777);
    assert_eq!(roundtrip(&tall), tall);
}

#[test]
fn limits_max_memory() {
    let mut bitmap = Bitmap::from_image(checkerboard(16, 16)).unwrap();
    let encoded = bitmap.encode(Unstoppable).unwrap();
    let limits = Limits {
        max_memory_bytes: Some(16 * 16 * 3 - 1),
        ..Default::default()
    };
    let err = DecodeRequest::new(&encoded)
        .with_limits(&limits)
        .decode(Unstoppable)
        .unwrap_err();
    assert!(matches!(err, BitmapError::LimitExceeded(_)));
}

// ── BMP conformance corpus tests (codec-corpus crate) ────────────────

#[cfg(not(target_arch = "wasm32"))]
mod bmp_corpus {
    use bmpfilters::*;

    fn get_corpus(subdir: &str) -> Option<std::path::PathBuf> {
        let corpus = codec_corpus::Corpus::new().ok()?;
        corpus.get(&format!("bmp-conformance/{subdir}")).ok()
    }

    fn bmp_files(dir: &std::path::Path) -> Vec<std::path::PathBuf> {
        let mut files: Vec<_> = std::fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|e| e == "bmp"))
            .collect();
        files.sort();
        files
    }

    fn file_name(p: &std::path::Path) -> String {
        p.file_name().unwrap().to_string_lossy().into_owned()
    }

    /// Bottom-up, uncompressed, 24-bit, 40-byte info header, pixels at 54.
    fn is_plain_24bit(data: &[u8]) -> bool {
        if data.len() < 54 {
            return false;
        }
        let u16_at = |o: usize| u16::from_le_bytes([data[o], data[o + 1]]);
        let u32_at = |o: usize| u32::from_le_bytes([data[o], data[o + 1], data[o + 2], data[o + 3]]);
        &data[..2] == b"BM"
            && u32_at(10) == 54
            && u32_at(14) == 40
            && (u32_at(22) as i32) > 0
            && u16_at(28) == 24
            && u32_at(30) == 0
    }

    /// Plain 24-bit files in valid/ decode strictly and survive
    /// decode, encode, decode unchanged.
    #[test]
    #[ignore]
    fn valid_24bit_roundtrip() {
        let Some(dir) = get_corpus("valid") else {
            eprintln!("Skipping: bmp-conformance corpus not available");
            return;
        };
        let files = bmp_files(&dir);
        assert!(!files.is_empty(), "no BMP files found in valid/");

        let mut checked = 0;
        let mut failures = Vec::new();
        for path in &files {
            let data = std::fs::read(path).unwrap();
            if !is_plain_24bit(&data) {
                continue;
            }
            checked += 1;
            let result = DecodeRequest::new(&data)
                .with_permissiveness(BmpPermissiveness::Strict)
                .decode(Unstoppable)
                .and_then(|mut bitmap| {
                    let encoded = bitmap.encode(Unstoppable)?;
                    let again = decode_bmp(&encoded, Unstoppable)?;
                    Ok(again.image == bitmap.image)
                });
            match result {
                Ok(true) => {}
                Ok(false) => failures.push(format!("{}: pixels changed", file_name(path))),
                Err(e) => failures.push(format!("{}: {e}", file_name(path))),
            }
        }
        assert!(
            failures.is_empty(),
            "valid/ 24-bit files that failed:\n  {}",
            failures.join("\n  ")
        );
        eprintln!("valid/: {checked} plain 24-bit files roundtrip");
    }

    /// Other valid files are not 24-bit uncompressed and must be refused
    /// under Standard, not misread.
    #[test]
    #[ignore]
    fn valid_other_variants_rejected() {
        let Some(dir) = get_corpus("valid") else {
            eprintln!("Skipping: bmp-conformance corpus not available");
            return;
        };
        let mut unexpected_passes = Vec::new();
        for path in &bmp_files(&dir) {
            let data = std::fs::read(path).unwrap();
            if data.len() < 54 {
                continue;
            }
            let bpp = u16::from_le_bytes([data[28], data[29]]);
            let compression = u32::from_le_bytes([data[30], data[31], data[32], data[33]]);
            let is_v3_header = u32::from_le_bytes([data[14], data[15], data[16], data[17]]) == 40;
            if is_v3_header && (bpp != 24 || compression != 0) && decode_bmp(&data, Unstoppable).is_ok()
            {
                unexpected_passes.push(file_name(path));
            }
        }
        assert!(
            unexpected_passes.is_empty(),
            "non-24-bit files accepted under Standard:\n  {}",
            unexpected_passes.join("\n  ")
        );
    }

    /// No invalid file should panic under any permissiveness level.
    /// A 64MB memory limit keeps pathological headers from OOMing.
    #[test]
    #[ignore]
    fn invalid_no_panics() {
        let Some(dir) = get_corpus("invalid") else {
            eprintln!("Skipping: bmp-conformance corpus not available");
            return;
        };
        let limits = Limits {
            max_memory_bytes: Some(64 * 1024 * 1024),
            ..Default::default()
        };

        let mut panics = Vec::new();
        for path in &bmp_files(&dir) {
            let data = std::fs::read(path).unwrap();
            for level in [
                BmpPermissiveness::Strict,
                BmpPermissiveness::Standard,
                BmpPermissiveness::Permissive,
            ] {
                if std::panic::catch_unwind(|| {
                    let _ = DecodeRequest::new(&data)
                        .with_limits(&limits)
                        .with_permissiveness(level)
                        .decode(Unstoppable);
                })
                .is_err()
                {
                    panics.push(format!("{} ({level:?})", file_name(path)));
                }
            }
        }
        assert!(panics.is_empty(), "panics:\n  {}", panics.join("\n  "));
    }
}
