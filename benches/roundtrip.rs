use criterion::{black_box, criterion_group, criterion_main, Criterion};
use unicode_util::codec::{ucs4_to_utf8, utf8_to_ucs4};
use unicode_util::{Converter, Encoding};

fn bench_scalar_roundtrip(c: &mut Criterion) {
    c.bench_function("codec/roundtrip_full_range", |b| {
        b.iter(|| {
            let mut buf = [0u8; 4];
            for value in 0..0x1F_FFFFu32 {
                let len = ucs4_to_utf8(black_box(value), &mut buf).unwrap();
                let (decoded, _) = utf8_to_ucs4(&buf[..len]).unwrap();
                black_box(decoded);
            }
        })
    });
}

fn bench_buffer_convert(c: &mut Criterion) {
    // Mixed-width sample: ASCII, 2-, 3-, and 4-byte sequences.
    let text: String = "a\u{E9}\u{4E16}\u{1F600}".repeat(4096);
    let to_ucs4 = Converter::new(Encoding::Utf8, Encoding::Ucs4).unwrap();
    let to_utf8 = Converter::new(Encoding::Ucs4, Encoding::Utf8).unwrap();
    let words = to_ucs4.convert(text.as_bytes()).unwrap();

    c.bench_function("convert/utf8_to_ucs4", |b| {
        b.iter(|| to_ucs4.convert(black_box(text.as_bytes())).unwrap())
    });
    c.bench_function("convert/ucs4_to_utf8", |b| {
        b.iter(|| to_utf8.convert(black_box(&words)).unwrap())
    });
}

criterion_group!(benches, bench_scalar_roundtrip, bench_buffer_convert);
criterion_main!(benches);
