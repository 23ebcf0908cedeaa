//! Per-IC grayscale output registers

/// Output groups per IC (`OUT0`..`OUT3`)
pub const GROUP_COUNT: usize = 4;
/// Sub-channels per group (A, B, C)
pub const CHANNELS_PER_GROUP: usize = 3;
/// Grayscale channels per IC
pub const CHANNEL_COUNT: usize = GROUP_COUNT * CHANNELS_PER_GROUP;

/// Output group of an IC, named after its `OUTn` pins
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Output {
    Out0 = 0,
    Out1 = 1,
    Out2 = 2,
    Out3 = 3,
}

impl Output {
    /// Every group, in output-number order
    pub const ALL: [Output; GROUP_COUNT] =
        [Output::Out0, Output::Out1, Output::Out2, Output::Out3];

    /// Output group `n`, `None` above `OUT3`
    pub const fn from_index(n: usize) -> Option<Self> {
        match n {
            0 => Some(Output::Out0),
            1 => Some(Output::Out1),
            2 => Some(Output::Out2),
            3 => Some(Output::Out3),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Position of this group's A sub-channel in shift-register order
    pub const fn raw_offset(self) -> usize {
        (GROUP_COUNT - 1 - self.index()) * CHANNELS_PER_GROUP
    }
}

/// Three sub-channel magnitudes of one output group
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OutputGroup {
    pub a: u16,
    pub b: u16,
    pub c: u16,
}

/// The twelve grayscale registers of one IC.
///
/// Groups are addressed by [`Output`], so `group(Output::Out3)` is `OUT3`.
/// The flat "raw" order used by [`from_raw`](Self::from_raw) and
/// [`to_raw`](Self::to_raw) is the shift-register order: `OUT3` A, B, C first,
/// `OUT0` A, B, C last.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OutputRegisters {
    groups: [OutputGroup; GROUP_COUNT],
}

impl OutputRegisters {
    pub const fn new() -> Self {
        Self {
            groups: [OutputGroup { a: 0, b: 0, c: 0 }; GROUP_COUNT],
        }
    }

    pub fn from_raw(raw: &[u16; CHANNEL_COUNT]) -> Self {
        let mut registers = Self::new();
        for (position, chunk) in raw.chunks_exact(CHANNELS_PER_GROUP).enumerate() {
            registers.groups[GROUP_COUNT - 1 - position] = OutputGroup {
                a: chunk[0],
                b: chunk[1],
                c: chunk[2],
            };
        }
        registers
    }

    /// Magnitudes in shift-register order
    pub fn to_raw(&self) -> [u16; CHANNEL_COUNT] {
        let mut raw = [0; CHANNEL_COUNT];
        for (position, group) in self.groups.iter().rev().enumerate() {
            let base = position * CHANNELS_PER_GROUP;
            raw[base] = group.a;
            raw[base + 1] = group.b;
            raw[base + 2] = group.c;
        }
        raw
    }

    pub fn group(&self, output: Output) -> &OutputGroup {
        &self.groups[output.index()]
    }

    pub fn group_mut(&mut self, output: Output) -> &mut OutputGroup {
        &mut self.groups[output.index()]
    }

    pub fn clear(&mut self) {
        self.groups = [OutputGroup::default(); GROUP_COUNT];
    }
}
