//! Schema-layer tests: registry round trips, defaults, polymorphic
//! resolution, failure surfaces.

use muesli::{
    from_str, muesli, to_string, to_string_with, Context, Error, Format, Record, Registry, Spec,
    SubSpec, Value,
};

#[derive(Clone, Debug, PartialEq)]
struct Engine {
    power: i64,
    turbo: bool,
}

#[derive(Clone, Debug, PartialEq)]
struct Wheel {
    size: i64,
}

#[derive(Clone, Debug, PartialEq)]
struct Car {
    name: String,
    seats: i64,
    engine: Engine,
    wheels: Vec<Wheel>,
}

impl Record for Engine {
    fn spec_name(&self) -> &str {
        "Engine"
    }
}

impl Record for Wheel {
    fn spec_name(&self) -> &str {
        "Wheel"
    }
}

impl Record for Car {
    fn spec_name(&self) -> &str {
        "Car"
    }
}

fn car_registry() -> Registry {
    let mut registry = Registry::new();
    registry.register(
        Spec::<Engine>::builder("Engine", |data, spec, registry, _context| {
            Ok(Engine {
                power: spec.get_i64("power", data, registry)?,
                turbo: spec.get_bool("turbo", data, registry)?,
            })
        })
        .field("power", 90, |e: &Engine| e.power)
        .field("turbo", false, |e: &Engine| e.turbo)
        .build(),
    );
    registry.register(
        Spec::<Wheel>::builder("Wheel", |data, spec, registry, _context| {
            Ok(Wheel {
                size: spec.get_i64("size", data, registry)?,
            })
        })
        .field("size", 16, |w: &Wheel| w.size)
        .build(),
    );
    registry.register(
        Spec::<Car>::builder("Car", |data, spec, registry, context| {
            Ok(Car {
                name: spec.get_string("name", data, registry)?,
                seats: spec.get_i64("seats", data, registry)?,
                engine: spec.get_record("engine", data, registry, context)?,
                wheels: spec.get_records("wheels", data, registry, context)?,
            })
        })
        .field("name", "", |c: &Car| c.name.clone())
        .field("seats", 5, |c: &Car| c.seats)
        .nested("engine", "Engine", |c: &Car| c.engine.clone())
        .record_list("wheels", |c: &Car| c.wheels.clone())
        .build(),
    );
    registry
}

fn sample_car() -> Car {
    Car {
        name: "Delta 88".to_string(),
        seats: 2,
        engine: Engine {
            power: 120,
            turbo: true,
        },
        wheels: vec![Wheel { size: 17 }, Wheel { size: 17 }],
    }
}

#[test]
fn test_round_trip() {
    let registry = car_registry();
    let car = sample_car();

    let text = to_string(&registry, &car).unwrap();
    let back: Car = from_str(&registry, &text).unwrap();
    assert_eq!(car, back);
}

#[test]
fn test_round_trip_skipping_defaults() {
    let registry = car_registry();
    let car = sample_car();
    let context = Context::skipping_defaults();

    let text = to_string_with(&registry, &car, &Format::standard(), &context).unwrap();
    let back: Car = from_str(&registry, &text).unwrap();
    assert_eq!(car, back);
}

#[test]
fn test_defaults_omitted_from_output() {
    let registry = car_registry();
    let car = Car {
        name: "base".to_string(),
        seats: 5,
        engine: Engine {
            power: 90,
            turbo: false,
        },
        wheels: Vec::new(),
    };

    let plain = to_string(&registry, &car).unwrap();
    assert!(plain.contains("seats"));
    assert!(plain.contains("engine"));
    assert!(plain.contains("wheels"));

    let context = Context::skipping_defaults();
    let text = to_string_with(&registry, &car, &Format::standard(), &context).unwrap();
    assert!(!text.contains("seats"));
    assert!(!text.contains("engine"));
    assert!(!text.contains("wheels"));

    // Absent fields restore their registered defaults, the nested spec's
    // synthesized default included.
    let back: Car = from_str(&registry, &text).unwrap();
    assert_eq!(car, back);
}

#[test]
fn test_value_tree_shape() {
    let registry = car_registry();
    let tree = muesli::to_value(&registry, &sample_car()).unwrap();

    let obj = tree.as_object().unwrap();
    assert_eq!(obj.type_name(), "Car");
    let keys: Vec<_> = obj.keys().cloned().collect();
    assert_eq!(keys, vec!["name", "seats", "engine", "wheels"]);
    assert_eq!(obj.object("engine").unwrap().type_name(), "Engine");
}

#[test]
fn test_missing_spec_on_serialize() {
    #[derive(Clone)]
    struct Ghost;
    impl Record for Ghost {
        fn spec_name(&self) -> &str {
            "Ghost"
        }
    }

    let registry = car_registry();
    let err = to_string(&registry, &Ghost).unwrap_err();
    assert!(matches!(err, Error::MissingSpec { .. }));
    assert!(err.to_string().contains("Ghost"));
}

#[test]
fn test_wrong_type_serializes_to_null() {
    let registry = car_registry();
    let wheel = Wheel { size: 16 };
    let value = registry
        .to_value_as("Engine", &wheel, &Context::none())
        .unwrap();
    assert_eq!(value, Value::Null);
}

#[test]
fn test_unknown_type_name() {
    let registry = car_registry();
    let err = from_str::<Engine>(&registry, "Bogus { x 1 }").unwrap_err();
    assert!(matches!(err, Error::UnknownType { .. }));
    assert!(err.to_string().contains("Bogus"));
    assert!(err.to_string().contains("Engine"));
}

#[test]
fn test_incompatible_request_names_both_types() {
    let registry = car_registry();
    let err = from_str::<Wheel>(&registry, "Engine { power 1 turbo true }").unwrap_err();
    match &err {
        Error::InvalidType { expected, actual } => {
            assert!(expected.contains("Wheel"));
            assert!(actual.contains("Engine"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_last_registration_wins() {
    let mut registry = Registry::new();
    registry.register(
        Spec::<Wheel>::builder("Wheel", |data, spec, registry, _context| {
            Ok(Wheel {
                size: spec.get_i64("size", data, registry)?,
            })
        })
        .field("size", 1, |w: &Wheel| w.size)
        .build(),
    );
    registry.register(
        Spec::<Wheel>::builder("Wheel", |data, spec, registry, _context| {
            Ok(Wheel {
                size: spec.get_i64("size", data, registry)?,
            })
        })
        .field("size", 2, |w: &Wheel| w.size)
        .build(),
    );

    let wheel: Wheel = from_str(&registry, "Wheel {}").unwrap();
    assert_eq!(wheel.size, 2);
}

// Polymorphic resolution fixtures.

#[derive(Clone, Debug, PartialEq)]
struct Circle {
    radius: f64,
}

#[derive(Clone, Debug, PartialEq)]
struct Rect {
    width: f64,
    height: f64,
}

#[derive(Clone, Debug, PartialEq)]
enum Shape {
    Circle(Circle),
    Rect(Rect),
}

impl Record for Shape {
    fn spec_name(&self) -> &str {
        match self {
            Shape::Circle(_) => "Circle",
            Shape::Rect(_) => "Rect",
        }
    }
}

fn shape_registry() -> Registry {
    let mut registry = Registry::new();
    let circle = registry.register(
        Spec::<Circle>::builder("Circle", |data, spec, registry, _context| {
            let radius = spec.get_f64("radius", data, registry)?;
            if radius < 0.0 {
                return Err(Error::custom("radius must be non-negative"));
            }
            Ok(Circle { radius })
        })
        .field("radius", 0.0, |c: &Circle| c.radius)
        .build(),
    );
    let rect = registry.register(
        Spec::<Rect>::builder("Rect", |data, spec, registry, _context| {
            Ok(Rect {
                width: spec.get_f64("width", data, registry)?,
                height: spec.get_f64("height", data, registry)?,
            })
        })
        .field("width", 0.0, |r: &Rect| r.width)
        .field("height", 0.0, |r: &Rect| r.height)
        .build(),
    );
    registry.register_sub_spec(
        SubSpec::new()
            .with(&circle, Shape::Circle, |s| match s {
                Shape::Circle(c) => Some(c),
                _ => None,
            })
            .with(&rect, Shape::Rect, |s| match s {
                Shape::Rect(r) => Some(r),
                _ => None,
            }),
    );
    registry
}

#[test]
fn test_polymorphic_round_trip() {
    let registry = shape_registry();
    for shape in [
        Shape::Circle(Circle { radius: 2.5 }),
        Shape::Rect(Rect {
            width: 1.5,
            height: 3.0,
        }),
    ] {
        let text = to_string(&registry, &shape).unwrap();
        let back: Shape = from_str(&registry, &text).unwrap();
        assert_eq!(shape, back);
    }
}

#[test]
fn test_typed_node_resolves_by_name() {
    let registry = shape_registry();
    let shape: Shape = from_str(&registry, "Circle { radius 2.0 }").unwrap();
    assert_eq!(shape, Shape::Circle(Circle { radius: 2.0 }));
}

#[test]
fn test_untyped_node_resolves_structurally() {
    let registry = shape_registry();

    let shape: Shape = from_str(&registry, "{ radius 2.5 }").unwrap();
    assert_eq!(shape, Shape::Circle(Circle { radius: 2.5 }));

    let shape: Shape = from_str(&registry, "{ width 1.0 height 2.0 }").unwrap();
    assert_eq!(
        shape,
        Shape::Rect(Rect {
            width: 1.0,
            height: 2.0
        })
    );
}

#[test]
fn test_no_structural_match_carries_data() {
    let registry = shape_registry();
    // 'radius' is object-kinded here, so no candidate matches.
    let err = from_str::<Shape>(&registry, "{ radius { x 1 } }").unwrap_err();
    match &err {
        Error::NoMatch { data } => assert!(data.contains("radius")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_construction_failure_after_match_is_surfaced() {
    let registry = shape_registry();
    // Structurally a Circle; the constructor rejects it, and the failure is
    // surfaced instead of falling through to another candidate.
    let err = from_str::<Shape>(&registry, "{ radius -1.0 }").unwrap_err();
    assert!(matches!(err, Error::Custom(_)));
    assert!(err.to_string().contains("non-negative"));
}

#[test]
fn test_scalar_kind_match_surfaces_field_error() {
    let registry = shape_registry();
    // A string is still scalar-kinded, so the Circle candidate matches; the
    // typed field pull then fails hard.
    let err = from_str::<Shape>(&registry, "{ radius big }").unwrap_err();
    assert!(matches!(err, Error::InvalidType { .. }));
}

#[test]
fn test_registration_order_is_precedence() {
    #[derive(Clone, Debug, PartialEq)]
    struct First {
        tag: i64,
    }
    #[derive(Clone, Debug, PartialEq)]
    struct Second {
        tag: i64,
    }
    #[derive(Clone, Debug, PartialEq)]
    enum Either {
        First(First),
        Second(Second),
    }

    fn registry_in_order(first_first: bool) -> Registry {
        let mut registry = Registry::new();
        let first = registry.register(
            Spec::<First>::builder("First", |data, spec, registry, _context| {
                Ok(First {
                    tag: spec.get_i64("tag", data, registry)?,
                })
            })
            .field("tag", 0, |f: &First| f.tag)
            .build(),
        );
        let second = registry.register(
            Spec::<Second>::builder("Second", |data, spec, registry, _context| {
                Ok(Second {
                    tag: spec.get_i64("tag", data, registry)?,
                })
            })
            .field("tag", 0, |s: &Second| s.tag)
            .build(),
        );

        let sub = SubSpec::new();
        let sub = if first_first {
            sub.with(&first, Either::First, |e| match e {
                Either::First(f) => Some(f),
                _ => None,
            })
            .with(&second, Either::Second, |e| match e {
                Either::Second(s) => Some(s),
                _ => None,
            })
        } else {
            sub.with(&second, Either::Second, |e| match e {
                Either::Second(s) => Some(s),
                _ => None,
            })
            .with(&first, Either::First, |e| match e {
                Either::First(f) => Some(f),
                _ => None,
            })
        };
        registry.register_sub_spec(sub);
        registry
    }

    // Both candidates match structurally; the first registered always wins.
    let either: Either = from_str(&registry_in_order(true), "{ tag 7 }").unwrap();
    assert_eq!(either, Either::First(First { tag: 7 }));

    let either: Either = from_str(&registry_in_order(false), "{ tag 7 }").unwrap();
    assert_eq!(either, Either::Second(Second { tag: 7 }));
}

#[test]
fn test_untyped_node_without_sub_spec_fails() {
    let registry = car_registry();
    let err = from_str::<Engine>(&registry, "{ power 1 turbo true }").unwrap_err();
    assert!(matches!(err, Error::UnknownType { .. }));
}

#[test]
fn test_serde_interop() {
    use serde::Serialize;

    #[derive(Serialize)]
    struct Plain {
        name: String,
        count: i64,
        tags: Vec<String>,
    }

    let plain = Plain {
        name: "Ada".to_string(),
        count: 3,
        tags: vec!["a".to_string(), "b".to_string()],
    };
    let tree = muesli!({ "name": "Ada", "count": 3, "tags": ["a", "b"] });

    // The value tree and the derived struct agree in serde's data model.
    let json_direct = serde_json::to_value(&plain).unwrap();
    let json_tree = serde_json::to_value(&tree).unwrap();
    assert_eq!(json_direct, json_tree);

    let back: Value = serde_json::from_value(json_tree).unwrap();
    assert_eq!(back, tree);
}
