use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hdf5::File;
use molino::core::rsd::{apply_rsd, RsdAxis};
use molino::{CatalogRequest, Cosmology, GalaxyCatalog, MolinoConfig, Redshift};
use ndarray::Array2;
use std::fs;
use std::path::Path;

fn write_mock(root: &Path, rows: usize) {
    let config = MolinoConfig::new(root);
    let path = config
        .catalog_path(Redshift::Zero, Cosmology::Fiducial, 1, 1)
        .unwrap();
    fs::create_dir_all(path.parent().unwrap()).unwrap();

    let file = File::create(&path).unwrap();
    let pos = Array2::from_shape_fn((rows, 3), |(i, j)| ((i * 7 + j * 13) % 1000) as f64);
    for name in ["pos", "vel", "vel_offset"] {
        let ds = file
            .new_dataset::<f64>()
            .shape((rows, 3))
            .create(name)
            .unwrap();
        ds.write(&pos).unwrap();
    }
}

fn read_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog_read");

    for rows in [1_000, 100_000] {
        let dir = tempfile::tempdir().unwrap();
        write_mock(dir.path(), rows);
        let reader = GalaxyCatalog::new(MolinoConfig::new(dir.path())).unwrap();

        group.bench_with_input(BenchmarkId::new("real_space_xyz", rows), &reader, |b, r| {
            let request = CatalogRequest::new("fiducial");
            b.iter(|| r.read(black_box(&request)).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("rsd_z", rows), &reader, |b, r| {
            let request = CatalogRequest::new("fiducial").rsd("z").columns(["x", "y", "z", "vz"]);
            b.iter(|| r.read(black_box(&request)).unwrap());
        });
    }

    group.finish();
}

fn rsd_benchmark(c: &mut Criterion) {
    let rows = 100_000;
    let offset = Array2::from_elem((rows, 3), 333.3);

    c.bench_function("apply_rsd_100k", |b| {
        let mut pos = Array2::from_elem((rows, 3), 500.0);
        b.iter(|| apply_rsd(&mut pos, black_box(offset.view()), RsdAxis::Z, 1000.0));
    });
}

criterion_group!(benches, read_benchmark, rsd_benchmark);
criterion_main!(benches);
