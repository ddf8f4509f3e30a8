#![no_main]
use std::{cell::RefCell, ops::ControlFlow};

use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng; // faster than StdRng
use rand::{Rng, SeedableRng};
use taihen_config::{
    FilterOptions, MAX_LINE_LENGTH, PathFilter, TokenizeError, Tokenizer, check, collect_paths,
    try_for_each_path, validate,
};

thread_local! {
    // One SmallRng per thread, seeded once from the host OS
    static RNG: RefCell<SmallRng> =
        RefCell::new(SmallRng::from_os_rng());
}

static SECTION_NAMES: &[&str] = &["ALL", "KERNEL", "main", "PCSE00000", "NPXS10015", ""];

static WS_TABLE: &[&[u8]] = &[b" ", b"\t", b"\x0b", b"\x0c", "\u{a0}".as_bytes()];

static TERMINATORS: &[&[u8]] = &[b"\n", b"\r", b"\r\n", b"\n\n"];

/// Helper: borrow the thread-local RNG and run a closure with it.
fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

/// Occasionally replaces the input with a freshly generated, mostly
/// well-formed configuration so the fuzzer spends time past the first line.
fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size == 0 || seed % 10 == 0 {
        let document = with_rng(generate_config);
        let len = document.len().min(max_size);
        data[..len].copy_from_slice(&document[..len]);
        len
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

fn push_whitespace(rng: &mut SmallRng, out: &mut Vec<u8>) {
    for _ in 0..rng.random_range(0..3) {
        out.extend_from_slice(WS_TABLE[rng.random_range(0..WS_TABLE.len())]);
    }
}

fn generate_config(rng: &mut SmallRng) -> Vec<u8> {
    let mut out = Vec::new();
    for _ in 0..rng.random_range(1..32) {
        push_whitespace(rng, &mut out);
        match rng.random_range(0..10) {
            0 => out.extend_from_slice(b"# comment"),
            1..=3 => {
                out.push(b'*');
                push_whitespace(rng, &mut out);
                if rng.random_bool(0.3) {
                    out.push(b'!');
                    push_whitespace(rng, &mut out);
                }
                let name = SECTION_NAMES[rng.random_range(0..SECTION_NAMES.len())];
                out.extend_from_slice(name.as_bytes());
            }
            4..=8 => {
                out.extend_from_slice(b"ux0:tai/");
                for _ in 0..rng.random_range(1..24) {
                    out.push(rng.random());
                }
                out.extend_from_slice(b".suprx");
            }
            _ => out.extend(std::iter::repeat_n(b'a', rng.random_range(200..300))),
        }
        push_whitespace(rng, &mut out);
        out.extend_from_slice(TERMINATORS[rng.random_range(0..TERMINATORS.len())]);
    }
    out
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug, Arbitrary)]
struct Query {
    section: u8,
    stop_after: Option<u8>,
}

fn check_document(data: &[u8]) {
    let Ok(query) = Query::arbitrary(&mut Unstructured::new(data)) else {
        return;
    };
    let section = SECTION_NAMES[usize::from(query.section) % SECTION_NAMES.len()];

    // The tokenizer terminates within three tokens per physical line and
    // only ever fails on overlong lines.
    let bound = 3 * (data.len() + 1);
    let mut produced = 0;
    for item in Tokenizer::new(data) {
        produced += 1;
        assert!(produced <= bound, "tokenizer did not terminate");
        match item {
            Ok(_) => {}
            Err(TokenizeError::LineTooLong { len, .. }) => assert!(len >= MAX_LINE_LENGTH),
            Err(err) => panic!("unexpected tokenizer error: {err}"),
        }
    }

    let valid = validate(data);
    assert_eq!(valid, check(data).is_ok());

    let options = FilterOptions {
        surface_errors: true,
        panic_on_error: false,
    };
    let streamed: Vec<_> = PathFilter::with_options(data, section, options).collect();
    if valid {
        assert!(streamed.iter().all(Result::is_ok));
    }

    let collected = collect_paths(data, section);
    let ok_paths: Vec<_> = streamed.iter().filter_map(|p| p.as_ref().ok()).collect();
    assert_eq!(collected.len(), ok_paths.len());

    let limit = query.stop_after.map_or(usize::MAX, usize::from);
    let mut seen = 0;
    let _ = try_for_each_path(data, section, |_| {
        seen += 1;
        if seen >= limit {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });
    assert!(seen <= collected.len());
    assert!(seen <= limit.max(1));
}

fuzz_target!(|data: &[u8]| check_document(data));
