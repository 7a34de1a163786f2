use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use oddsheet::flatten::{flatten_event_outcomes, flatten_events, snapshot_rows};
use oddsheet::model::{Bookmaker, Event, Market, Outcome};

fn outcome(name: &str, price: f64, point: Option<f64>) -> Outcome {
    Outcome {
        name: name.to_string(),
        price,
        point,
        description: None,
    }
}

fn sample_events(count: usize) -> Vec<Event> {
    (0..count)
        .map(|i| {
            let home = format!("Home Team {i}");
            let away = format!("Away Team {i}");
            let markets = vec![
                Market {
                    key: "h2h".to_string(),
                    last_update: Some("2024-01-07T17:45:11Z".to_string()),
                    outcomes: vec![outcome(&home, -150.0, None), outcome(&away, 130.0, None)],
                },
                Market {
                    key: "spreads".to_string(),
                    last_update: Some("2024-01-07T17:45:11Z".to_string()),
                    outcomes: vec![
                        outcome(&home, -110.0, Some(-3.5)),
                        outcome(&away, -110.0, Some(3.5)),
                    ],
                },
                Market {
                    key: "totals".to_string(),
                    last_update: Some("2024-01-07T17:45:11Z".to_string()),
                    outcomes: vec![
                        outcome("Over", -105.0, Some(47.5)),
                        outcome("Under", -115.0, Some(47.5)),
                    ],
                },
            ];
            let bookmakers = (0..5)
                .map(|b| Bookmaker {
                    key: format!("book{b}"),
                    last_update: "2024-01-07T17:45:11Z".to_string(),
                    markets: markets.clone(),
                })
                .collect();
            Event {
                id: format!("event{i}"),
                commence_time: "2024-01-07T18:00:00Z".to_string(),
                home_team: home,
                away_team: away,
                bookmakers,
            }
        })
        .collect()
}

fn bench_flatten(c: &mut Criterion) {
    let events = sample_events(200);

    c.bench_function("flatten_events_200x5x3", |b| {
        b.iter(|| flatten_events(black_box(&events)))
    });

    c.bench_function("snapshot_rows_200x5x3", |b| {
        b.iter(|| snapshot_rows(black_box("2023-09-10T11:55:04Z"), black_box(&events)))
    });

    c.bench_function("flatten_event_outcomes_5x3x2", |b| {
        b.iter(|| flatten_event_outcomes(black_box(&events[0])))
    });
}

criterion_group!(benches, bench_flatten);
criterion_main!(benches);
