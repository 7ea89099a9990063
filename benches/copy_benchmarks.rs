use criterion::{
    BenchmarkId,
    Criterion,
    Throughput,
    criterion_group,
    criterion_main, //
};
use securec_helpers::*;
use std::hint::black_box;

const SOURCE: &[u8] = b"Benchmarking secure strcpy replacement!\0";

/// Unbounded baseline: trusts `dest` to be large enough for `src`.
#[cfg(unix)]
#[allow(clippy::disallowed_methods)]
fn unbounded_strcpy(
    dest: &mut [u8],
    src: &[u8],
) {
    unsafe {
        libc::strcpy(dest.as_mut_ptr().cast(), src.as_ptr().cast());
    }
}

fn benchmark_copy(c: &mut Criterion) {
    let mut group = c.benchmark_group("copy");
    let mut dest = [0u8; 100];

    #[cfg(unix)]
    group.bench_function("libc_strcpy", |b| {
        b.iter(|| unbounded_strcpy(black_box(&mut dest), black_box(SOURCE)))
    });

    group.bench_function("bounded_copy", |b| {
        b.iter(|| bounded_copy(black_box(&mut dest), black_box(SOURCE), 100))
    });

    group.bench_function("bounded_copy_truncating", |b| {
        b.iter(|| bounded_copy(black_box(&mut dest), black_box(SOURCE), 16))
    });

    group.bench_function("bounded_format", |b| {
        b.iter(|| bounded_format!(black_box(&mut dest), 100, "Hi {}", black_box("Ayushman")))
    });

    group.finish();
}

fn benchmark_copy_sizes(c: &mut Criterion) {
    let sizes: &[usize] = &[16, 64, 256, 1024, 4096];
    let mut group = c.benchmark_group("copy_sizes");

    for &size in sizes {
        let mut src = vec![b'A'; size];
        src.push(0);
        let mut dest = vec![0u8; size + 1];
        group.throughput(Throughput::Bytes(size as u64));

        #[cfg(unix)]
        group.bench_with_input(BenchmarkId::new("libc_strcpy", size), &size, |b, _| {
            b.iter(|| unbounded_strcpy(black_box(&mut dest), black_box(&src)))
        });

        group.bench_with_input(BenchmarkId::new("bounded_copy", size), &size, |b, &sz| {
            b.iter(|| bounded_copy(black_box(&mut dest), black_box(&src), sz + 1))
        });
    }
    group.finish();
}

fn benchmark_read_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_line");
    let input = b"Ayushman\n".repeat(64);
    let mut dest = [0u8; 20];

    group.bench_function("bounded_read_line_from", |b| {
        b.iter(|| {
            let mut reader = black_box(&input[..]);
            while let Ok(line) = bounded_read_line_from(&mut reader, &mut dest, 20) {
                if line.end_of_input {
                    break;
                }
            }
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_copy,
    benchmark_copy_sizes,
    benchmark_read_line
);
criterion_main!(benches);
