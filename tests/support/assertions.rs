use bulkpay::domain::outcome::{TransferOutcome, TransferStatus};

pub fn is_lower_hex(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

pub fn assert_hex_len(s: &str, len: usize) {
    assert_eq!(s.len(), len, "expected {len} hex chars, got {}", s.len());
    assert!(is_lower_hex(s), "not lowercase hex: {s}");
}

pub fn assert_all_status(outcomes: &[TransferOutcome], status: TransferStatus) {
    for outcome in outcomes {
        assert_eq!(
            outcome.status, status,
            "{} ended {:?}: {:?}",
            outcome.id_value, outcome.status, outcome.error
        );
    }
}

/// Elapsed virtual time equals `expected`, up to timer resolution.
pub fn assert_elapsed(started: tokio::time::Instant, expected: std::time::Duration) {
    let elapsed = started.elapsed();
    let slack = std::time::Duration::from_millis(5);
    assert!(
        elapsed >= expected && elapsed <= expected + slack,
        "expected {expected:?} to pass, got {elapsed:?}"
    );
}
