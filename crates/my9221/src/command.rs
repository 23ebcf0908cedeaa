//! Command register encoding
//!
//! The MY9221 command word (`CMD[15:0]`, shifted in as `D[207:192]`) packs eight
//! independent fields. Bits 15:11 are reserved and left zero by [`CommandFields::pack`].
//!
//! ```text
//! 15..11  10    9:8  7:5  4    3    2    1       0
//! ------  hspd  bs   gck  sep  osc  pol  cntset  onest
//! ```

/// Bit position and mask of one command field
struct Field {
    shift: u16,
    mask: u16,
}

impl Field {
    const fn pack(&self, value: u16) -> u16 {
        (value << self.shift) & self.mask
    }

    const fn unpack(&self, word: u16) -> u16 {
        (word & self.mask) >> self.shift
    }
}

const HSPD: Field = Field {
    shift: 10,
    mask: 0x0400,
};
const BS: Field = Field {
    shift: 8,
    mask: 0x0300,
};
const GCK: Field = Field {
    shift: 5,
    mask: 0x00e0,
};
const SEP: Field = Field {
    shift: 4,
    mask: 0x0010,
};
const OSC: Field = Field {
    shift: 3,
    mask: 0x0008,
};
const POL: Field = Field {
    shift: 2,
    mask: 0x0004,
};
const CNTSET: Field = Field {
    shift: 1,
    mask: 0x0002,
};
const ONEST: Field = Field {
    shift: 0,
    mask: 0x0001,
};

/// Output rise/fall time (`hspd`)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum SlewRate {
    #[default]
    Slow = 0,
    Fast = 1,
}

/// Grayscale resolution (`bs`)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum BitDepth {
    #[default]
    Bits8 = 0,
    Bits12 = 1,
    Bits14 = 2,
    Bits16 = 3,
}

impl BitDepth {
    /// Largest grayscale magnitude at this resolution.
    ///
    /// Normalized writes scale `1.0` to this value.
    pub const fn full_scale(self) -> u16 {
        match self {
            BitDepth::Bits8 => 0x00ff,
            BitDepth::Bits12 => 0x0fff,
            BitDepth::Bits14 => 0x3fff,
            BitDepth::Bits16 => 0xffff,
        }
    }
}

/// Internal oscillator frequency divider (`gck`)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum OscillatorDivider {
    #[default]
    Div1 = 0,
    Div2 = 1,
    Div4 = 2,
    Div8 = 3,
    Div16 = 4,
    Div64 = 5,
    Div128 = 6,
    Div256 = 7,
}

/// Output waveform (`sep`)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum Waveform {
    /// MY-PWM, only meaningful at 8-bit resolution
    #[default]
    MyPwm = 0,
    /// Adaptive pulse density modulation
    Apdm = 1,
}

/// Grayscale clock source (`osc`)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ClockSource {
    #[default]
    Internal = 0,
    External = 1,
}

/// Output polarity (`pol`)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum Polarity {
    /// Normal LED driving
    #[default]
    Led = 0,
    /// MY-PWM test output
    MyPwmTest = 1,
}

/// Grayscale counter reset (`cntset`)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum CounterReset {
    #[default]
    FreeRun = 0,
    Reset = 1,
}

/// One-shot select (`onest`)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ShotMode {
    #[default]
    Repeat = 0,
    OneShot = 1,
}

/// Typed view of every command field.
///
/// The default value packs to `0x0000`, the power-on command of a freshly
/// constructed driver.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CommandFields {
    pub slew: SlewRate,
    pub bit_depth: BitDepth,
    pub divider: OscillatorDivider,
    pub waveform: Waveform,
    pub clock_source: ClockSource,
    pub polarity: Polarity,
    pub counter_reset: CounterReset,
    pub shot: ShotMode,
}

impl CommandFields {
    /// Pack the fields into a command word
    pub const fn pack(&self) -> Command {
        Command(
            HSPD.pack(self.slew as u16)
                | BS.pack(self.bit_depth as u16)
                | GCK.pack(self.divider as u16)
                | SEP.pack(self.waveform as u16)
                | OSC.pack(self.clock_source as u16)
                | POL.pack(self.polarity as u16)
                | CNTSET.pack(self.counter_reset as u16)
                | ONEST.pack(self.shot as u16),
        )
    }
}

impl From<CommandFields> for Command {
    fn from(fields: CommandFields) -> Self {
        fields.pack()
    }
}

/// A 16-bit command word as it goes out on the wire
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Command(u16);

impl Command {
    pub const ZERO: Command = Command(0);

    /// Wrap a raw word, reserved bits included.
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn slew(self) -> SlewRate {
        match HSPD.unpack(self.0) {
            0 => SlewRate::Slow,
            _ => SlewRate::Fast,
        }
    }

    pub const fn bit_depth(self) -> BitDepth {
        match BS.unpack(self.0) {
            0 => BitDepth::Bits8,
            1 => BitDepth::Bits12,
            2 => BitDepth::Bits14,
            _ => BitDepth::Bits16,
        }
    }

    pub const fn divider(self) -> OscillatorDivider {
        match GCK.unpack(self.0) {
            0 => OscillatorDivider::Div1,
            1 => OscillatorDivider::Div2,
            2 => OscillatorDivider::Div4,
            3 => OscillatorDivider::Div8,
            4 => OscillatorDivider::Div16,
            5 => OscillatorDivider::Div64,
            6 => OscillatorDivider::Div128,
            _ => OscillatorDivider::Div256,
        }
    }

    pub const fn waveform(self) -> Waveform {
        match SEP.unpack(self.0) {
            0 => Waveform::MyPwm,
            _ => Waveform::Apdm,
        }
    }

    pub const fn clock_source(self) -> ClockSource {
        match OSC.unpack(self.0) {
            0 => ClockSource::Internal,
            _ => ClockSource::External,
        }
    }

    pub const fn polarity(self) -> Polarity {
        match POL.unpack(self.0) {
            0 => Polarity::Led,
            _ => Polarity::MyPwmTest,
        }
    }

    pub const fn counter_reset(self) -> CounterReset {
        match CNTSET.unpack(self.0) {
            0 => CounterReset::FreeRun,
            _ => CounterReset::Reset,
        }
    }

    pub const fn shot(self) -> ShotMode {
        match ONEST.unpack(self.0) {
            0 => ShotMode::Repeat,
            _ => ShotMode::OneShot,
        }
    }

    /// Decode every field. Reserved bits are dropped.
    pub const fn fields(self) -> CommandFields {
        CommandFields {
            slew: self.slew(),
            bit_depth: self.bit_depth(),
            divider: self.divider(),
            waveform: self.waveform(),
            clock_source: self.clock_source(),
            polarity: self.polarity(),
            counter_reset: self.counter_reset(),
            shot: self.shot(),
        }
    }
}
