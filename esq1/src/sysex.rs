//! The SysEx container used to move patches to and from the instrument.
//!
//! A dump is laid out as
//!
//! ```text
//! F0 0F 02 <channel> <dump type> <payload> F7
//! ```
//!
//! where the payload is the packed patches with every byte sent as two
//! transport bytes, low nibble first.  A single dump carries one patch and
//! a bank dump carries exactly [BANK_SIZE].

use std::path::Path;

use log::{debug, warn};

use crate::error::{Error, FormatError};
use crate::packing::{ByteReader, Packed};
use crate::patch::Patch;

/// Start of a system exclusive message
pub const SYSEX_START: u8 = 0xF0;
/// Manufacturer ID (Ensoniq)
pub const ENSONIQ_ID: u8 = 0x0F;
/// Product ID (ESQ-1)
pub const ESQ1_ID: u8 = 0x02;
/// End of a system exclusive message
pub const SYSEX_END: u8 = 0xF7;
/// Number of patches in a bank dump
pub const BANK_SIZE: usize = 40;

const HEADER: [u8; 3] = [SYSEX_START, ENSONIQ_ID, ESQ1_ID];
const NIBBLE: u8 = 0x0F;

/// The kind of dump, selected by the byte after the channel
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DumpType {
    /// One patch
    Single = 0x01,
    /// A full bank of [BANK_SIZE] patches
    Bank = 0x02,
}

impl DumpType {
    /// Look up the dump type for its wire value
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x01 => Some(Self::Single),
            0x02 => Some(Self::Bank),
            _ => None,
        }
    }
    /// Number of patches a dump of this type carries
    pub const fn patch_count(&self) -> usize {
        match self {
            Self::Single => 1,
            Self::Bank => BANK_SIZE,
        }
    }
    /// The dump type used to send `count` patches
    const fn for_count(count: usize) -> Self {
        if count == 1 {
            Self::Single
        } else {
            Self::Bank
        }
    }
}

/// A decoded dump along with the framing bytes it arrived with
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dump {
    /// The channel byte, passed through untouched
    pub channel: u8,
    /// Single or bank dump
    pub dump_type: DumpType,
    /// Exactly [DumpType::patch_count] patches
    pub patches: Vec<Patch>,
}

impl Dump {
    /// The channel byte as a MIDI channel, if it is in `0..16`
    pub fn midi_channel(&self) -> Option<wmidi::Channel> {
        wmidi::Channel::from_index(self.channel).ok()
    }
}

/// Decode a complete dump, keeping its channel and type.
///
/// The whole input is checked before any patch is returned: a bad header,
/// an unknown dump type, a transport byte above `0x0F`, a missing end
/// marker or a field out of range all fail the decode.  Bytes following
/// the end marker are ignored.
pub fn decode_dump(bytes: &[u8]) -> Result<Dump, Error> {
    let mut reader = ByteReader::new(bytes);
    for marker in HEADER {
        reader.expect(marker)?;
    }
    let channel = reader.read_u8()?;
    let type_byte = reader.read_u8()?;
    let dump_type = DumpType::from_u8(type_byte).ok_or(FormatError::UnknownDumpType(type_byte))?;

    let count = dump_type.patch_count();
    let payload = read_nibbles(&mut reader, count * Patch::SIZE)?;
    reader.expect(SYSEX_END)?;
    if reader.remaining() > 0 {
        warn!(
            "ignoring {} byte(s) after the end of the dump",
            reader.remaining()
        );
    }

    let mut payload = ByteReader::new(&payload);
    let patches = (0..count)
        .map(|_| Patch::decode(&mut payload))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(
        "decoded {:?} dump on channel {}: {} patch(es)",
        dump_type,
        channel,
        patches.len()
    );
    Ok(Dump {
        channel,
        dump_type,
        patches,
    })
}

/// Decode a dump into its patches
pub fn decode(bytes: &[u8]) -> Result<Vec<Patch>, Error> {
    Ok(decode_dump(bytes)?.patches)
}

/// Encode patches into a dump for the given channel byte.
///
/// One patch makes a single dump.  Anything more makes a bank dump, padded
/// with default patches or cut down to [BANK_SIZE].
pub fn encode(patches: &[Patch], channel: u8) -> Result<Vec<u8>, Error> {
    if patches.is_empty() {
        return Err(Error::NoPatches);
    }
    let dump_type = DumpType::for_count(patches.len());
    let count = dump_type.patch_count();
    debug!("encoding {:?} dump on channel {}", dump_type, channel);
    if dump_type == DumpType::Bank {
        if patches.len() < count {
            warn!(
                "padding bank with {} default patch(es)",
                count - patches.len()
            );
        } else if patches.len() > count {
            warn!("dropping {} patch(es) past the end of the bank", patches.len() - count);
        }
    }

    let mut payload = Vec::with_capacity(count * Patch::SIZE);
    let padding = Patch::new();
    for patch in patches.iter().chain(std::iter::repeat(&padding)).take(count) {
        patch.pack(&mut payload);
    }

    let mut out = Vec::with_capacity(HEADER.len() + 2 + 2 * payload.len() + 1);
    out.extend_from_slice(&HEADER);
    out.push(channel);
    out.push(dump_type as u8);
    for byte in payload {
        out.push(byte & NIBBLE);
        out.push(byte >> 4);
    }
    out.push(SYSEX_END);
    Ok(out)
}

/// [encode] for a typed MIDI channel
pub fn encode_for_channel(patches: &[Patch], channel: wmidi::Channel) -> Result<Vec<u8>, Error> {
    encode(patches, channel.index())
}

/// Read and decode a dump file
pub fn load(path: impl AsRef<Path>) -> Result<Vec<Patch>, Error> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    debug!("read {} bytes from {}", bytes.len(), path.display());
    decode(&bytes)
}

/// Encode patches and write the dump to a file
pub fn save(path: impl AsRef<Path>, patches: &[Patch], channel: u8) -> Result<(), Error> {
    let bytes = encode(patches, channel)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Join `len` pairs of transport bytes back into payload bytes
fn read_nibbles(reader: &mut ByteReader<'_>, len: usize) -> Result<Vec<u8>, FormatError> {
    let mut out = Vec::with_capacity(len);
    for _ in 0..len {
        let low = read_nibble(reader)?;
        let high = read_nibble(reader)?;
        out.push(low | high << 4);
    }
    Ok(out)
}

fn read_nibble(reader: &mut ByteReader<'_>) -> Result<u8, FormatError> {
    let offset = reader.position();
    match reader.read_u8()? {
        value if value > NIBBLE => Err(FormatError::InvalidNibble { offset, value }),
        value => Ok(value),
    }
}
