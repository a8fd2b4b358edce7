use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec3;
use molmesh::curve::{shapes, sweep_spline, BaseShapes, CatmullRomSpline};
use molmesh::mesh::Icosphere;
use molmesh::molecule::{MoleculeGeometry, PeriodicTable, Polypeptide};
use molmesh::options::{CurveOptions, GeometryOptions, MoleculeOptions};

fn icosphere_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("icosphere");
    for level in [1, 2, 3, 4] {
        group.bench_function(format!("subdivisions_{level}"), |b| {
            b.iter(|| black_box(Icosphere::new(black_box(level)).mesh(1.0)))
        });
    }
    group.finish();
}

fn sweep_benchmark(c: &mut Criterion) {
    let control: Vec<Vec3> = (0..40)
        .map(|i| {
            let t = i as f32 * 0.4;
            Vec3::new(t.cos() * 2.0, t.sin() * 2.0, t * 0.3)
        })
        .collect();
    let spline = CatmullRomSpline::new(control, 10);
    let shape = BaseShapes::Uniform(shapes::circle(0.2, 16));
    let options = CurveOptions::default();

    c.bench_function("sweep_catmull_rom_circle", |b| {
        b.iter(|| black_box(sweep_spline(&spline, &shape, None, &options)))
    });
}

fn molecule_benchmark(c: &mut Criterion) {
    let codes = ["ALA", "ARG", "ASN", "ASP", "CYS", "GLN", "PRO", "TRP"];
    let chain = Polypeptide::from_codes(codes.iter().copied().cycle().take(32));
    let Ok(chain) = chain else { return };
    let options = MoleculeOptions::default();

    c.bench_function("layout_polypeptide_32", |b| {
        b.iter(|| {
            black_box(MoleculeGeometry::build(chain.tree(), &PeriodicTable, &options))
        })
    });

    let geometry = MoleculeGeometry::build(chain.tree(), &PeriodicTable, &options);
    let geometry_options = GeometryOptions::default();
    c.bench_function("tessellate_polypeptide_32", |b| {
        b.iter(|| black_box(geometry.merged_mesh(&geometry_options)))
    });
}

criterion_group!(benches, icosphere_benchmark, sweep_benchmark, molecule_benchmark);
criterion_main!(benches);
