#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp(width: i32, height: i32, pixel_bytes: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; 54];
    out[0] = b'B';
    out[1] = b'M';
    out[2..6].copy_from_slice(&(54 + pixel_bytes.len() as u32).to_le_bytes()); // file size
    out[10..14].copy_from_slice(&54u32.to_le_bytes()); // pixel offset
    out[14..18].copy_from_slice(&40u32.to_le_bytes()); // info header size
    out[18..22].copy_from_slice(&width.to_le_bytes());
    out[22..26].copy_from_slice(&height.to_le_bytes());
    out[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    out[28..30].copy_from_slice(&24u16.to_le_bytes()); // bpp
    out.extend_from_slice(pixel_bytes);
    out
}

fn main() {
    use std::fs;
    for target in ["fuzz_decode", "fuzz_roundtrip"] {
        let dir = format!("fuzz/corpus/{target}");
        fs::create_dir_all(&dir).unwrap();

        // 1x1: 3 bytes BGR + 1 padding
        fs::write(format!("{dir}/bmp_1x1.bmp"), bmp(1, 1, &[0xff, 0, 0, 0])).unwrap();

        // 4x2: 12-byte rows, no padding
        let aligned: Vec<u8> = (0..24).map(|i| (i * 10) as u8).collect();
        fs::write(format!("{dir}/bmp_4x2.bmp"), bmp(4, 2, &aligned)).unwrap();

        // 5x3: 15-byte rows + 1 padding
        let padded: Vec<u8> = (0..48).map(|i| (i * 5) as u8).collect();
        fs::write(format!("{dir}/bmp_5x3.bmp"), bmp(5, 3, &padded)).unwrap();

        // Truncated/malformed seeds for edge coverage
        fs::write(format!("{dir}/empty.bin"), b"").unwrap();
        fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
        fs::write(format!("{dir}/headers_only.bmp"), bmp(2, 2, &[])).unwrap();
        fs::write(format!("{dir}/negative_height.bmp"), bmp(1, -1, &[0; 4])).unwrap();
    }
    println!("Generated seed corpora in fuzz/corpus/");
}
