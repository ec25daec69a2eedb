use std::time::{SystemTime, UNIX_EPOCH};

/// Create a string of all available items.
pub fn items_to_strings(items: Vec<&str>) -> String {
    let mut s = String::new();
    for i in items {
        s.push_str(i);
        s.push_str(&String::from(", "));
    }
    s
}

pub fn precision_round(n: f64, precision: i32) -> f64 {
    let p = (10.0_f64).powi(precision);
    (n * p).round() / p
}

/// Replace a zero seed with the current UNIX time in seconds.
pub fn resolve_seed(seed: u64) -> u64 {
    if seed > 0 {
        return seed;
    }
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs().max(1),
        Err(_) => 1,
    }
}

/// Index of the largest count, the first one wins ties.
pub fn first_max_index(counts: &[usize]) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for (i, c) in counts.iter().enumerate() {
        match best {
            Some((_, b)) if *c <= b => {}
            _ => best = Some((i, *c)),
        }
    }
    best.map(|(i, _)| i)
}
