use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use intros_tree::{decode, encode, from_str, intros_type, register, to_string};

#[derive(Default, Clone)]
struct Header {
    rev_major: u16,
    rev_minor: u16,
    description: String,
    author: String,
}

#[derive(Default, Clone)]
struct Position {
    x: f64,
    y: f64,
    z: f64,
}

#[derive(Default, Clone)]
struct Vertex {
    time: f64,
    position: Position,
}

#[derive(Default, Clone)]
struct Trajectory {
    name: String,
    closed: bool,
    vertices: Vec<Vertex>,
}

intros_type! {
    Header = "FileHeader" {
        rev_major: attribute "revMajor",
        rev_minor: attribute "revMinor",
        description: attribute "description",
        author: attribute "author",
    }

    Position = "Position" {
        x: attribute "WorldPosition.x",
        y: attribute "WorldPosition.y",
        z: attribute "WorldPosition.z",
    }

    Vertex = "Vertex" {
        time: attribute "time",
        position: element "Position",
    }

    Trajectory = "Trajectory" {
        name: attribute "name",
        closed: attribute "closed",
        vertices: element "Shape.Polyline.Vertex",
    }
}

fn header() -> Header {
    Header {
        rev_major: 1,
        rev_minor: 0,
        description: "Cut-in".to_string(),
        author: "bench".to_string(),
    }
}

fn trajectory(size: u32) -> Trajectory {
    Trajectory {
        name: "ego_path".to_string(),
        closed: false,
        vertices: (0..size)
            .map(|i| Vertex {
                time: f64::from(i) * 0.1,
                position: Position {
                    x: f64::from(i) * 1.5,
                    y: 3.25,
                    z: 0.0,
                },
            })
            .collect(),
    }
}

fn benchmark_encode_simple(c: &mut Criterion) {
    let header = header();
    register::<Header>().unwrap();

    c.bench_function("encode_simple_struct", |b| {
        b.iter(|| encode(black_box(&header)))
    });
}

fn benchmark_decode_simple(c: &mut Criterion) {
    let doc = encode(&header()).unwrap();

    c.bench_function("decode_simple_struct", |b| {
        b.iter(|| decode::<Header>(black_box(&doc)))
    });
}

fn benchmark_to_string_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("to_string_array");

    for size in [10, 50, 100, 500].iter() {
        let value = trajectory(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| to_string(black_box(&value)))
        });
    }
    group.finish();
}

fn benchmark_from_str_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("from_str_array");

    for size in [10, 50, 100, 500].iter() {
        let xml = to_string(&trajectory(*size)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| from_str::<Trajectory>(black_box(&xml)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_encode_simple,
    benchmark_decode_simple,
    benchmark_to_string_array,
    benchmark_from_str_array
);
criterion_main!(benches);
