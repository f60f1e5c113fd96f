//! Run a full analysis on synthetic experiment logs and print the report.
//!
//! ```bash
//! cargo run --example report
//! cargo run --example report -- --json
//! ```

use rand::SeedableRng;
use rand_distr::{Bernoulli, Distribution, LogNormal};
use rand_xoshiro::Xoshiro256PlusPlus;
use uplift_oracle::{
    output, Alternative, CleanLogs, ExperimentOracle, LogRecord, Variant, BOOKING_REQUEST,
};

/// Synthetic experiment: 2,000 users per arm, B converts a little more
/// often and spends a little more per booking.
fn generate_logs() -> CleanLogs {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
    let cities = ["valencia", "murcia", "bilbao", "sevilla"];
    let spend = LogNormal::new(3.2, 0.6).unwrap();
    let mut records = Vec::new();

    for (variant, cvr, scale, offset) in [
        (Variant::A, 0.11, 1.00, 0u64),
        (Variant::B, 0.13, 1.08, 100_000),
    ] {
        let converts = Bernoulli::new(cvr).unwrap();
        for u in 0..2_000u64 {
            let user_id = offset + u;
            let city = cities[(u % cities.len() as u64) as usize];
            records.push(LogRecord {
                user_id,
                variant,
                city: city.to_string(),
                event_type: "page_view".to_string(),
                revenue: None,
                datetime: "2023-05-14T09:00:00".to_string(),
            });
            if converts.sample(&mut rng) {
                records.push(LogRecord {
                    user_id,
                    variant,
                    city: city.to_string(),
                    event_type: BOOKING_REQUEST.to_string(),
                    revenue: Some(spend.sample(&mut rng) * scale),
                    datetime: "2023-05-14T11:30:00".to_string(),
                });
            }
        }
    }
    CleanLogs::new(records)
}

fn main() {
    let as_json = std::env::args().any(|arg| arg == "--json");

    let logs = generate_logs();
    let report = ExperimentOracle::new()
        .seed(1234)
        .conversion_alternative(Alternative::Larger)
        .revenue_alternative(Alternative::Larger)
        .run(&logs)
        .unwrap_or_else(|err| {
            eprintln!("analysis failed: {err}");
            std::process::exit(1);
        });

    if as_json {
        println!("{}", output::json::to_json_pretty(&report).unwrap());
    } else {
        println!("{}", output::terminal::format_report(&report));
    }
}
