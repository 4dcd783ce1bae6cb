//! Basic tour of the `Any` container.
//!
//! Run with `cargo run --example basic`.

use std::collections::BTreeMap;

use anyhold::prelude::*;

#[derive(Clone, Debug)]
struct Endpoint {
    host: String,
    port: u16,
}

fn describe(any: &Any) -> String {
    if let Ok(n) = any.downcast_ref::<i32>() {
        format!("an i32: {n}")
    } else if let Ok(s) = any.downcast_ref::<String>() {
        format!("a String: {s:?}")
    } else if let Ok(e) = any.downcast_ref::<Endpoint>() {
        format!("an endpoint: {}:{}", e.host, e.port)
    } else if any.has_value() {
        format!("something else ({})", any.type_name())
    } else {
        String::from("nothing")
    }
}

fn main() -> Result<(), BadAnyCast> {
    // A heterogeneous bag of settings.
    let mut settings: BTreeMap<&str, Any> = BTreeMap::new();
    settings.insert("retries", Any::new(3_i32));
    settings.insert("name", Any::in_place(in_place_type::<String>(), "service"));
    settings.insert(
        "endpoint",
        Any::new(Endpoint {
            host: String::from("localhost"),
            port: 8080,
        }),
    );
    settings.insert("ratio", Any::new(0.5_f64));
    settings.insert("unset", Any::empty());

    for (key, value) in &settings {
        println!("{key:>8}: {}", describe(value));
    }

    // Copies are independent.
    let mut endpoint = settings["endpoint"].clone();
    any_cast_mut::<Endpoint>(&mut endpoint)?.port = 9090;
    println!(
        "original port {}, copy port {}",
        any_cast_ref::<Endpoint>(&settings["endpoint"])?.port,
        any_cast_ref::<Endpoint>(&endpoint)?.port,
    );

    // Asking for the wrong type is an error, not a crash.
    match any_cast::<u64>(&settings["retries"]) {
        Ok(n) => println!("retries as u64: {n}"),
        Err(err) => println!("expected failure: {err}"),
    }

    // Replace a value with one of a different type.
    if let Some(ratio) = settings.get_mut("ratio") {
        let percent: &mut String = ratio.emplace("50");
        percent.push('%');
    }
    println!("ratio is now {}", describe(&settings["ratio"]));

    Ok(())
}
