use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use muesli::{
    from_str, parse, to_string, write_value, Context, Record, Registry, Spec, Value,
};

#[derive(Clone, Debug, PartialEq)]
struct User {
    id: i64,
    name: String,
    email: String,
    active: bool,
}

impl Record for User {
    fn spec_name(&self) -> &str {
        "User"
    }
}

fn user_registry() -> Registry {
    let mut registry = Registry::new();
    registry.register(
        Spec::<User>::builder("User", |data, spec, registry, _context| {
            Ok(User {
                id: spec.get_i64("id", data, registry)?,
                name: spec.get_string("name", data, registry)?,
                email: spec.get_string("email", data, registry)?,
                active: spec.get_bool("active", data, registry)?,
            })
        })
        .field("id", 0, |u: &User| u.id)
        .field("name", "", |u: &User| u.name.clone())
        .field("email", "", |u: &User| u.email.clone())
        .field("active", false, |u: &User| u.active)
        .build(),
    );
    registry
}

fn sample_user(i: i64) -> User {
    User {
        id: i,
        name: format!("User {}", i),
        email: format!("user{}@example.com", i),
        active: i % 2 == 0,
    }
}

fn sample_document(users: usize) -> String {
    let registry = user_registry();
    let mut list = muesli::List::new();
    for i in 0..users {
        let tree = registry
            .to_value(&sample_user(i as i64), &Context::none())
            .unwrap();
        list.add(tree);
    }
    write_value(&Value::List(list))
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for size in [10, 100, 500].iter() {
        let text = sample_document(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| parse(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_write(c: &mut Criterion) {
    let registry = user_registry();
    let mut list = muesli::List::new();
    for i in 0..100 {
        list.add(registry.to_value(&sample_user(i), &Context::none()).unwrap());
    }
    let tree = Value::List(list);

    c.bench_function("write_100_users", |b| {
        b.iter(|| write_value(black_box(&tree)))
    });
}

fn benchmark_serialize(c: &mut Criterion) {
    let registry = user_registry();
    let user = sample_user(42);

    c.bench_function("serialize_user", |b| {
        b.iter(|| to_string(black_box(&registry), black_box(&user)))
    });
}

fn benchmark_deserialize(c: &mut Criterion) {
    let registry = user_registry();
    let text = to_string(&registry, &sample_user(42)).unwrap();

    c.bench_function("deserialize_user", |b| {
        b.iter(|| from_str::<User>(black_box(&registry), black_box(&text)))
    });
}

fn benchmark_roundtrip(c: &mut Criterion) {
    let registry = user_registry();
    let user = sample_user(42);

    c.bench_function("roundtrip_user", |b| {
        b.iter(|| {
            let text = to_string(black_box(&registry), black_box(&user)).unwrap();
            let _back: User = from_str(black_box(&registry), black_box(&text)).unwrap();
        })
    });
}

fn benchmark_comparison_with_json(c: &mut Criterion) {
    let text = sample_document(100);
    let json: String = {
        let value = parse(&text).unwrap();
        serde_json::to_string(&value).unwrap()
    };

    let mut group = c.benchmark_group("comparison");

    group.bench_function("muesli_parse", |b| b.iter(|| parse(black_box(&text))));

    group.bench_function("json_parse", |b| {
        b.iter(|| serde_json::from_str::<serde_json::Value>(black_box(&json)))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_parse,
    benchmark_write,
    benchmark_serialize,
    benchmark_deserialize,
    benchmark_roundtrip,
    benchmark_comparison_with_json
);
criterion_main!(benches);
