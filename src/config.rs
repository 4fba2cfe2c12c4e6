//! Compile-time configuration
//!
//! Every tunable number of the firmware lives here. Nothing is reconfigured at
//! runtime and nothing is persisted; a power cycle starts from these values.

/// Indicator on-time for one flash, busy-waited with the core running.
pub const FLASH_HOLD_MS: u32 = 100;

/// Dark ticks between flashes inside a group (~1.5 s).
pub const SHORT_GAP_TICKS: u8 = 3;

/// Dark ticks after the last flash of a group (~4 s).
pub const LONG_GAP_TICKS: u8 = 8;

/// Flashes per group.
pub const FLASHES_PER_GROUP: u8 = 3;

/// Shape of one flash group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashPattern {
    pub flashes: u8,
    pub hold_ms: u32,
    pub short_gap_ticks: u8,
    pub long_gap_ticks: u8,
}

impl FlashPattern {
    /// Gap that follows flash `index` (zero based).
    pub const fn gap_after(&self, index: u8) -> u8 {
        if index.saturating_add(1) >= self.flashes {
            self.long_gap_ticks
        } else {
            self.short_gap_ticks
        }
    }

    /// Ticks spent asleep over one full group. A group without flashes is a
    /// single long gap.
    pub const fn ticks_per_group(&self) -> u32 {
        if self.flashes == 0 {
            return self.long_gap_ticks as u32;
        }
        (self.flashes as u32 - 1) * self.short_gap_ticks as u32 + self.long_gap_ticks as u32
    }
}

/// Three flashes, 1.5 s apart, then 4 s dark.
pub const LIGHTHOUSE: FlashPattern = FlashPattern {
    flashes: FLASHES_PER_GROUP,
    hold_ms: FLASH_HOLD_MS,
    short_gap_ticks: SHORT_GAP_TICKS,
    long_gap_ticks: LONG_GAP_TICKS,
};

/// Periodic wake timer parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickTiming {
    /// Nominal frequency of the always-on oscillator.
    pub oscillator_hz: u32,
    /// Reference clock the period counter runs from.
    pub reference_hz: u32,
    /// Reference cycles per tick.
    pub period_cycles: u32,
}

impl TickTiming {
    /// Oscillator cycles per reference cycle.
    pub const fn reference_divider(&self) -> u32 {
        self.oscillator_hz / self.reference_hz
    }

    /// Nominal tick length. Drifts with the RC oscillator.
    pub const fn period_ms(&self) -> u32 {
        self.period_cycles * 1_000 / self.reference_hz
    }
}

/// LSI (~40 kHz) divided to 1 kHz, 500 cycles per tick.
pub const TICK_TIMING: TickTiming = TickTiming {
    oscillator_hz: 40_000,
    reference_hz: 1_000,
    period_cycles: 500,
};

/// Diagnostic byte flasher timings.
pub const BIT_ONE_MS: u32 = 700;
pub const BIT_ZERO_MS: u32 = 100;
pub const BIT_GAP_MS: u32 = 1_000;

/// Pauses framing the bring-up report.
pub const BRINGUP_LEAD_MS: u32 = 1_000;
pub const BRINGUP_TRAIL_MS: u32 = 2_000;
