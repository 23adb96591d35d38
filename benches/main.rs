// Released under MIT License.
// Copyright (c) 2023-2024 Ladislav Bartos

use criterion::{criterion_group, criterion_main, Criterion};
use gro_rs::{
    io::gro_io::{normalize, split_frames, GroParser, ParseStrategy},
    structures::{atom::Atom, residue::Residue, vector3d::Vector3D},
    system::System,
};
use rand::{Rng, SeedableRng};

/// Construct a water box with randomly placed atoms.
fn random_water(n_molecules: usize, box_size: f32) -> System {
    let mut rng = rand::rngs::StdRng::seed_from_u64(1234);

    let residues = (0..n_molecules)
        .map(|_| {
            let atoms = [("O", "OW"), ("H", "HW1"), ("H", "HW2")]
                .iter()
                .map(|(symbol, atom_type)| {
                    let position = Vector3D::new(
                        rng.gen_range(-box_size / 2.0..box_size / 2.0),
                        rng.gen_range(-box_size / 2.0..box_size / 2.0),
                        rng.gen_range(-box_size / 2.0..box_size / 2.0),
                    );
                    Atom::new(symbol, position).with_export("grotype", atom_type)
                })
                .collect();

            Residue::new(atoms).with_export("groname", "SOL")
        })
        .collect();

    System::from_residues("Random water", residues, box_size).unwrap()
}

fn benchmark(c: &mut Criterion) {
    let system = random_water(10000, 10.0);
    let content = system.to_gro_string().unwrap();

    let mut trajectory = String::new();
    for _ in 0..10 {
        trajectory.push_str(&content);
    }

    c.bench_function("normalize", |b| {
        b.iter(|| {
            for token in ["OW", "HW1", "CA", "NA", "Fe", "XX99"] {
                let _ = std::hint::black_box(normalize(token));
            }
        })
    });

    c.bench_function("GroParser::parse_str (fixed)", |b| {
        b.iter(|| {
            std::hint::black_box(GroParser::new().parse_str(&content).unwrap());
        })
    });

    c.bench_function("GroParser::parse_str (whitespace)", |b| {
        let parser = GroParser::new().with_strategy(ParseStrategy::Whitespace);
        b.iter(|| {
            std::hint::black_box(parser.parse_str(&content).unwrap());
        })
    });

    c.bench_function("split_frames", |b| {
        let lines: Vec<&str> = trajectory.lines().collect();
        b.iter(|| {
            std::hint::black_box(split_frames(&lines).unwrap().count());
        })
    });

    c.bench_function("GroParser::parse_traj_str", |b| {
        b.iter(|| {
            std::hint::black_box(GroParser::new().parse_traj_str(&trajectory).unwrap());
        })
    });

    c.bench_function("System::to_gro_string", |b| {
        b.iter(|| {
            std::hint::black_box(system.to_gro_string().unwrap());
        })
    });
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
