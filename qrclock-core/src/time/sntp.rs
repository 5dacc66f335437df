//! SNTP request and response codec
//!
//! Packet layout (48 bytes, big-endian):
//! - byte 0: leap indicator (2 bits), version (3 bits), mode (3 bits)
//! - byte 1: stratum (0 = kiss-o'-death / unsynchronized)
//! - bytes 40..44: transmit timestamp, whole seconds since 1900-01-01

/// Size of an SNTP packet without extensions
pub const PACKET_LEN: usize = 48;

/// Well-known NTP port
pub const NTP_PORT: u16 = 123;

/// Seconds from 1900-01-01 to 1970-01-01
pub const NTP_UNIX_DELTA: u64 = 2_208_988_800;

/// LI 0, version 3, mode 3 (client)
const REQUEST_HEADER: u8 = 0x1B;

/// Mode 4 (server)
const MODE_SERVER: u8 = 4;

const MODE_MASK: u8 = 0x07;

const TRANSMIT_SECONDS: usize = 40;

/// Seconds in one 32-bit NTP era
const ERA_SECONDS: u64 = 1 << 32;

/// Errors decoding an SNTP response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SntpError {
    /// Response is not exactly one packet long
    Length,
    /// Response mode is not "server"
    Mode,
    /// Stratum 0: server is unsynchronized or refused the request
    Stratum,
    /// Transmit timestamp is zero
    NoTimestamp,
}

/// Build a client request packet
pub fn request() -> [u8; PACKET_LEN] {
    let mut packet = [0u8; PACKET_LEN];
    packet[0] = REQUEST_HEADER;
    packet
}

/// Validate a server response and return its transmit time as Unix
/// seconds
///
/// Timestamps below the Unix epoch are taken to be in NTP era 1
/// (after February 2036).
pub fn parse_response(packet: &[u8]) -> Result<u64, SntpError> {
    if packet.len() != PACKET_LEN {
        return Err(SntpError::Length);
    }
    if packet[0] & MODE_MASK != MODE_SERVER {
        return Err(SntpError::Mode);
    }
    if packet[1] == 0 {
        return Err(SntpError::Stratum);
    }

    let mut seconds = [0u8; 4];
    seconds.copy_from_slice(&packet[TRANSMIT_SECONDS..TRANSMIT_SECONDS + 4]);
    let ntp_seconds = u64::from(u32::from_be_bytes(seconds));
    if ntp_seconds == 0 {
        return Err(SntpError::NoTimestamp);
    }

    if ntp_seconds >= NTP_UNIX_DELTA {
        Ok(ntp_seconds - NTP_UNIX_DELTA)
    } else {
        Ok(ntp_seconds + ERA_SECONDS - NTP_UNIX_DELTA)
    }
}
