use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::{debug, trace, warn};

use crate::bus::Bus;
use crate::command::{Command, CommandFields};
use crate::config::{DriverConfig, InputPolicy, MAX_CHAIN_LEN};
use crate::error::Error;
use crate::registers::{CHANNEL_COUNT, OutputRegisters};

/// Command and grayscale registers of one IC in the chain
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct IcSlot {
    command: Command,
    outputs: OutputRegisters,
}

impl IcSlot {
    const EMPTY: IcSlot = IcSlot {
        command: Command::ZERO,
        outputs: OutputRegisters::new(),
    };
}

/// Driver for a chain of cascaded MY9221 ICs.
///
/// The driver keeps a register image of every IC. Setters only touch the image;
/// [`refresh`](Self::refresh) shifts the whole chain out and latches it.
///
/// ICs are addressed with a 1-based index, IC 1 being the one wired to the host.
pub struct My9221<DI, DCKI, D> {
    bus: Bus<DI, DCKI, D>,
    chain_len: u8,
    policy: InputPolicy,
    command: Command,
    chain: [IcSlot; MAX_CHAIN_LEN],
}

impl<DI, DCKI, D> My9221<DI, DCKI, D>
where
    DI: OutputPin,
    DCKI: OutputPin,
    D: DelayNs,
{
    /// Create a driver and pull both bus lines low
    ///
    /// # Arguments
    /// * `di` - Data line
    /// * `dcki` - Clock line
    /// * `delay` - Busy-wait used for the settle time between pin changes
    /// * `config` - Chain length, timing and input policy
    ///
    /// # Returns
    /// * `Err(Error::InvalidChainLength)` if the chain length is zero or above
    ///   [`MAX_CHAIN_LEN`]
    pub fn new(di: DI, dcki: DCKI, delay: D, config: DriverConfig) -> Result<Self, Error> {
        if config.chain_len == 0 || usize::from(config.chain_len) > MAX_CHAIN_LEN {
            return Err(Error::InvalidChainLength(config.chain_len));
        }

        let mut bus = Bus::new(di, dcki, delay, config.timing);
        bus.idle()?;

        debug!(
            "my9221: chain of {} IC(s), settle {} ns, {:?} input",
            config.chain_len, config.timing.settle_ns, config.policy
        );

        Ok(Self {
            bus,
            chain_len: config.chain_len,
            policy: config.policy,
            command: Command::ZERO,
            chain: [IcSlot::EMPTY; MAX_CHAIN_LEN],
        })
    }

    pub fn chain_len(&self) -> u8 {
        self.chain_len
    }

    /// The command most recently set, the one normalized writes scale against
    pub fn command(&self) -> Command {
        self.command
    }

    /// Store a raw command word for every IC
    pub fn command_raw_set(&mut self, word: u16) {
        self.broadcast(Command::from_bits(word));
    }

    /// Pack the command fields and store the result for every IC
    pub fn command_set(&mut self, fields: CommandFields) {
        self.broadcast(fields.pack());
    }

    /// Store twelve magnitudes for one IC, verbatim.
    ///
    /// `data` is in shift-register order: `OUT3` A, B, C down to `OUT0` A, B, C.
    pub fn data_raw_set(&mut self, data: &[u16; CHANNEL_COUNT], ic: u8) -> Result<(), Error> {
        let slot = self.slot(ic)?;
        self.chain[slot].outputs = OutputRegisters::from_raw(data);
        Ok(())
    }

    /// Store twelve normalized values for one IC.
    ///
    /// Each value is multiplied by the full scale of the current bit depth and
    /// truncated. Values already stored are not rescaled when the bit depth
    /// changes later.
    pub fn data_set(&mut self, data: &[f32; CHANNEL_COUNT], ic: u8) -> Result<(), Error> {
        let slot = self.slot(ic)?;

        if self.policy == InputPolicy::Strict && data.iter().any(|v| !(0.0..=1.0).contains(v)) {
            return Err(Error::ValueOutOfRange);
        }

        let full_scale = f32::from(self.command.bit_depth().full_scale());
        let raw = data.map(|value| scale(value, full_scale));
        self.chain[slot].outputs = OutputRegisters::from_raw(&raw);
        Ok(())
    }

    /// Register image of one IC, resolved the same way as the setters
    pub fn registers(&self, ic: u8) -> Result<&OutputRegisters, Error> {
        let slot = self.slot(ic)?;
        Ok(&self.chain[slot].outputs)
    }

    /// Command word stored for one IC
    pub fn ic_command(&self, ic: u8) -> Result<Command, Error> {
        let slot = self.slot(ic)?;
        Ok(self.chain[slot].command)
    }

    /// Zero the grayscale registers of every IC. Commands are kept.
    pub fn clear(&mut self) {
        for slot in &mut self.chain {
            slot.outputs.clear();
        }
    }

    /// Shift the whole chain out and latch it.
    ///
    /// IC 1 goes first. Each IC receives its command word followed by `OUT3`
    /// down to `OUT0`, sub-channels A, B, C in order. One latch follows the
    /// last IC.
    pub fn refresh(&mut self) -> Result<(), Error> {
        trace!("my9221: refresh {} IC(s)", self.chain_len);

        for slot in &self.chain[..usize::from(self.chain_len)] {
            self.bus.send_word(slot.command.bits())?;
            for word in slot.outputs.to_raw() {
                self.bus.send_word(word)?;
            }
        }

        self.bus.latch()
    }

    /// Tear the driver down and hand back the pins and delay
    pub fn release(self) -> (DI, DCKI, D) {
        self.bus.release()
    }

    fn broadcast(&mut self, command: Command) {
        if command != self.command {
            debug!("my9221: command {:#06x}", command.bits());
        }
        self.command = command;
        for slot in &mut self.chain[..usize::from(self.chain_len)] {
            slot.command = command;
        }
    }

    fn slot(&self, ic: u8) -> Result<usize, Error> {
        resolve_slot(ic, self.chain_len, self.policy)
    }
}

/// Map a 1-based IC index onto a register slot
fn resolve_slot(ic: u8, chain_len: u8, policy: InputPolicy) -> Result<usize, Error> {
    if (1..=chain_len).contains(&ic) {
        return Ok(usize::from(ic - 1));
    }

    match policy {
        InputPolicy::Permissive => {
            warn!("my9221: IC {} outside 1..={}, using IC 1", ic, chain_len);
            Ok(0)
        }
        InputPolicy::Strict => Err(Error::IcIndexOutOfRange(ic)),
    }
}

// Float to int casts truncate toward zero and saturate at the u16 bounds.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scale(value: f32, full_scale: f32) -> u16 {
    (value * full_scale) as u16
}
