use blocklinear::{
    block_linear_layer_size, copy_block_linear_to_pitch_subrect, pitch_surface_size, BlockDepth,
    BlockDim, BlockHeight, Dimensions,
};
use criterion::black_box;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn block_linear_to_pitch_subrect_benchmark(c: &mut Criterion) {
    let surface = Dimensions::new(1024, 1024, 1);
    let block_linear = vec![
        0u8;
        block_linear_layer_size(
            surface,
            BlockDim::uncompressed(),
            4,
            BlockHeight::Sixteen,
            BlockDepth::One
        )
    ];

    let mut group = c.benchmark_group("copy_block_linear_to_pitch_subrect");
    // Aligned origins take the whole GOB path while odd origins clip every edge.
    for (origin, size) in [(0, 256), (64, 256), (3, 250), (17, 500)] {
        let subrect = Dimensions::new(size, size, 1);
        let mut pitch_linear =
            vec![0u8; pitch_surface_size(subrect, BlockDim::uncompressed(), 4, 0)];

        group.throughput(Throughput::Bytes(pitch_linear.len() as u64));
        group.bench_with_input(
            BenchmarkId::new(format!("origin_{}", origin), size),
            &size,
            |b, _| {
                b.iter(|| {
                    copy_block_linear_to_pitch_subrect(
                        subrect,
                        surface,
                        BlockDim::uncompressed(),
                        black_box(4),
                        black_box(0),
                        BlockHeight::Sixteen,
                        BlockDepth::One,
                        &block_linear,
                        &mut pitch_linear,
                        black_box(origin),
                        black_box(origin),
                    )
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, block_linear_to_pitch_subrect_benchmark);
criterion_main!(benches);
