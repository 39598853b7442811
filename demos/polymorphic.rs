//! Polymorphic resolution: typed nodes resolve by name, untyped nodes by
//! structural matching against each candidate's field table.
//!
//! Run with: cargo run --example polymorphic

use muesli::{from_str, to_string, Record, Registry, Spec, SubSpec};
use std::error::Error;

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

fn main() -> Result<(), Box<dyn Error>> {
    let mut registry = Registry::new();
    let circle = registry.register(
        Spec::<Circle>::builder("Circle", |data, spec, registry, _context| {
            Ok(Circle {
                radius: spec.get_f64("radius", data, registry)?,
            })
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

    // Typed data resolves by name.
    let shape: Shape = from_str(&registry, "Circle { radius 2.5 }")?;
    println!("typed:    {:?}", shape);

    // Untyped data resolves by shape: 'width' and 'height' select Rect.
    let shape: Shape = from_str(&registry, "{ width 3.0 height 4.0 }")?;
    println!("untyped:  {:?}", shape);

    // Writing goes back out under the concrete candidate's name.
    println!("written:\n{}", to_string(&registry, &shape)?);

    Ok(())
}
