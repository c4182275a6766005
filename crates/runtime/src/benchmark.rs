pub const TARGET_SIMULATIONS_PER_SEC: u64 = 2_000;

pub fn calculate_simulations_per_sec(completed_runs: u64, elapsed_nanos: u128) -> u64 {
    if elapsed_nanos == 0 {
        return 0;
    }

    let scaled_runs = (completed_runs as u128).saturating_mul(1_000_000_000);
    let achieved = scaled_runs / elapsed_nanos;
    u64::try_from(achieved).unwrap_or(u64::MAX)
}

pub fn meets_target_simulations_per_sec(achieved: u64, target: u64) -> bool {
    achieved >= target
}
