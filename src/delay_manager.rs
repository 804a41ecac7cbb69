use log::info;
use std::thread;
use std::time::Duration;

const PROFILE_DELAY_SECS: u64 = 1;

/// Fixed pause between profile requests. Runs after every fetch,
/// success or failure.
pub fn courtesy_delay() {
    info!("Waiting for {} second(s) (Profile Delay)...", PROFILE_DELAY_SECS);
    thread::sleep(Duration::from_secs(PROFILE_DELAY_SECS));
}
