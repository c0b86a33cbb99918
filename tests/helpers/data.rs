use rand::Rng;

use arbor::common::{
    record::{Record, record},
    value::Value,
};

#[allow(dead_code)]
pub fn ids(list: &[i64]) -> Vec<Record> {
    list.iter().map(|i| record(&[("id", Value::Int64(*i))])).collect()
}

/// `n` records over a small key domain so duplicate runs are common.
#[allow(dead_code)]
pub fn random_records<R: Rng>(rng: &mut R, n: usize) -> Vec<Record> {
    let domain = (n as i64 / 2).max(1);

    (0..n)
        .map(|i| {
            let key = match rng.random_range(0..10) {
                0 => Value::Float64(rng.random_range(0..domain) as f64 + 0.5),
                1 => Value::String(format!("s{}", rng.random_range(0..domain))),
                _ => Value::Int64(rng.random_range(0..domain)),
            };
            record(&[
                ("k", key),
                ("g", Value::Int64(rng.random_range(0..3))),
                ("seq", Value::Int64(i as i64)),
            ])
        })
        .collect()
}

#[allow(dead_code)]
pub fn books() -> Vec<Record> {
    vec![
        record(&[("publisher", Value::Int64(21)), ("title", Value::from("The Pearl"))]),
        record(&[("publisher", Value::Int64(9)), ("title", Value::from("Jane Eyre"))]),
        record(&[
            ("publisher", Value::Int64(21)),
            ("title", Value::from("Lord of the Flies")),
        ]),
        record(&[("publisher", Value::Int64(4)), ("title", Value::from("Emma"))]),
    ]
}
