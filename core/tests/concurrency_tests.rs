use std::thread;

use kaiju::{ParseOptions, parse_to_json};

const SOURCES: [&str; 4] = [
    "function f(a, b) { return a + b * 2; }",
    "class A extends B { static m() { return super.m(); } }",
    "let { a, ...rest } = obj; for (const x of rest) console.log(`${x}`);",
    "x = async (y) => { await y; }; label: while (1) break label;",
];

#[test]
fn test_parallel_parses_are_independent() {
    let options = ParseOptions::default();
    let expected: Vec<String> = SOURCES
        .iter()
        .map(|source| parse_to_json(source, &options).expect("parse"))
        .collect();

    thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let options = &options;
                let expected = &expected;
                scope.spawn(move || {
                    for round in 0..25 {
                        let index = (worker + round) % SOURCES.len();
                        let json = parse_to_json(SOURCES[index], options).expect("parse");
                        assert_eq!(json, expected[index]);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("worker panicked");
        }
    });
}

#[test]
fn test_errors_in_one_thread_do_not_leak() {
    thread::scope(|scope| {
        let failing = scope.spawn(|| parse_to_json("let x = ;", &ParseOptions::default()));
        let passing = scope.spawn(|| parse_to_json("let x = 1;", &ParseOptions::default()));
        assert!(failing.join().expect("join").is_err());
        assert!(passing.join().expect("join").is_ok());
    });
}
