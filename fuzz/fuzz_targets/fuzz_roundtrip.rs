#![no_main]
use bmpfilters::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_pixels: Some(1 << 20),
        ..Default::default()
    };
    let Ok(mut decoded) = DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable)
    else {
        return;
    };

    // Decoded bitmaps must re-encode and decode to the same pixels.
    let encoded = decoded
        .encode(enough::Unstoppable)
        .expect("decoded bitmap failed to encode");
    let Ok(decoded2) = decode_bmp(&encoded, enough::Unstoppable) else {
        panic!("re-encoded data failed to decode");
    };
    assert_eq!(decoded.image, decoded2.image, "roundtrip pixel mismatch");

    // Filters must not panic on any decodable image.
    let mut image = decoded.image;
    let _ = ProcessRequest::new()
        .grayscale()
        .color_shift(ColorShift::new(40, -40, 300))
        .box_blur()
        .swiss_cheese()
        .seed(0)
        .strips(1)
        .apply(&mut image, enough::Unstoppable);
});
