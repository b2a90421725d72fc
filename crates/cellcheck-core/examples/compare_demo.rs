//! Comparison Demonstration
//!
//! Walks through comparing values that contain wrapper cells.
#![allow(clippy::unwrap_used, clippy::expect_used)]
//!
//! Key concepts illustrated:
//! 1. Cells are transparent to equality
//! 2. Rendered diffs for mismatches
//! 3. Circular structures fail instead of looping
//! 4. Registering another cell library's variant

use cellcheck_core::logging_facility::{init, Profile};
use cellcheck_core::{
    assertions, computed, equals, format, observable, CompareError, DereferenceError, Observable,
    Value, VariantRegistry, VariantSpec, WrapperCell,
};
use std::rc::Rc;

struct Signal(Value);

impl WrapperCell for Signal {
    fn variant(&self) -> &str {
        "signal"
    }

    fn dereference(&self) -> Result<Value, DereferenceError> {
        Ok(self.0.clone())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init(Profile::Development);
    println!("=== Cellcheck Comparison Demo ===\n");

    // ===== Part 1: Transparency =====
    println!("## Part 1: Transparency\n");

    let wrapped = observable(computed(|| 42));
    println!("{} vs 42 -> equal: {}", format(&wrapped, None)?, equals(&wrapped, &Value::from(42))?.is_equal());

    // ===== Part 2: Diffs =====
    println!("\n## Part 2: Diffs\n");

    let actual = observable(Value::map([("name", Value::str("ada")), ("age", Value::from(36))]));
    let expected = Value::map([("name", Value::str("ada")), ("age", Value::from(37))]);
    if let Err(err) = assertions::to_equal(&actual, &expected) {
        println!("{}\n", err);
    }
    let outcome = equals(&actual, &expected)?;
    if let Some(diff) = outcome.diff() {
        println!("Mismatches as JSON: {}", serde_json::to_string(&diff.mismatches())?);
    }

    // ===== Part 3: Circular Structures =====
    println!("\n## Part 3: Circular Structures\n");

    let x = Observable::empty();
    x.set(Value::map([("self", Value::from(x.clone()))]));
    let x = Value::from(x);
    println!("Inspected: {}", format(&x, None)?);
    match equals(&x, &x) {
        Err(CompareError::CircularStructure { path }) => println!("✓ Refused at {}", path),
        other => println!("unexpected: {:?}", other.map(|o| o.is_equal())),
    }

    // ===== Part 4: Custom Variants =====
    println!("\n## Part 4: Custom Variants\n");

    let registry = VariantRegistry::default().with_variant(VariantSpec::new("signal"))?;
    let signal = Value::from(Rc::new(Signal(Value::from(7))));
    let expect = assertions::Expect::new(&registry);
    expect.to_equal(&signal, &observable(7))?;
    println!("✓ signal(7) equals observable(7) once 'signal' is registered");

    println!("\n=== Demo Complete ===");
    Ok(())
}
