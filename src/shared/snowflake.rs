//! Snowflake ID Generator
//!
//! Twitter-style unique ID generation: 41 bits of milliseconds since a
//! custom epoch, 10 bits of machine id, 12 bits of per-millisecond sequence.

use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;

const MACHINE_BITS: u64 = 10;
const SEQUENCE_BITS: u64 = 12;
const MAX_MACHINE_ID: u64 = (1 << MACHINE_BITS) - 1;
const SEQUENCE_MASK: u64 = (1 << SEQUENCE_BITS) - 1;
const TIMESTAMP_SHIFT: u64 = MACHINE_BITS + SEQUENCE_BITS;

#[derive(Debug, Default)]
struct GeneratorState {
    last_timestamp: u64,
    sequence: u64,
}

/// Snowflake ID generator
#[derive(Debug)]
pub struct SnowflakeGenerator {
    machine_id: u64,
    epoch: u64,
    state: Mutex<GeneratorState>,
}

impl SnowflakeGenerator {
    /// Create a new snowflake generator
    pub fn new(machine_id: u64, epoch: u64) -> Self {
        Self {
            machine_id: machine_id & MAX_MACHINE_ID,
            epoch,
            state: Mutex::new(GeneratorState::default()),
        }
    }

    /// Generate a new snowflake ID
    pub fn generate(&self) -> i64 {
        let mut state = self.state.lock();
        let mut timestamp = current_timestamp().max(state.last_timestamp);

        if timestamp == state.last_timestamp {
            state.sequence = (state.sequence + 1) & SEQUENCE_MASK;
            if state.sequence == 0 {
                // Sequence exhausted for this millisecond; borrow the next one.
                timestamp += 1;
            }
        } else {
            state.sequence = 0;
        }
        state.last_timestamp = timestamp;

        let id = ((timestamp.saturating_sub(self.epoch)) << TIMESTAMP_SHIFT)
            | (self.machine_id << SEQUENCE_BITS)
            | state.sequence;

        id as i64
    }

    /// Extract the creation timestamp (Unix milliseconds) from an ID.
    pub fn extract_timestamp(&self, snowflake: i64) -> u64 {
        ((snowflake as u64) >> TIMESTAMP_SHIFT) + self.epoch
    }
}

/// Get current timestamp in milliseconds
fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// Parse snowflake from string
pub fn from_string(s: &str) -> Result<i64, std::num::ParseIntError> {
    s.parse()
}
