//! 16-byte guild identifiers carried by GUILD state-change events.
//!
//! The identifier overlays the `dst_agent`, `value` and `buff_dmg` fields of
//! the event. The first three groups are stored little-endian, the last three
//! big-endian, so only the latter are byte-swapped when decoding.

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GuildId {
    pub p1: u32,
    pub p2: u16,
    pub p3: u16,
    pub p4: u16,
    pub p5: u16,
    pub p6: u32,
}

impl GuildId {
    pub fn from_bytes(raw: [u8; 16]) -> Self {
        Self {
            p1: u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]),
            p2: u16::from_le_bytes([raw[4], raw[5]]),
            p3: u16::from_le_bytes([raw[6], raw[7]]),
            p4: u16::from_be_bytes([raw[8], raw[9]]),
            p5: u16::from_be_bytes([raw[10], raw[11]]),
            p6: u32::from_be_bytes([raw[12], raw[13], raw[14], raw[15]]),
        }
    }

    /// Rebuild the identifier from the three event fields it overlays.
    pub fn from_event_fields(dst_agent: u64, value: i32, buff_dmg: i32) -> Self {
        let mut raw = [0u8; 16];
        raw[..8].copy_from_slice(&dst_agent.to_le_bytes());
        raw[8..12].copy_from_slice(&value.to_le_bytes());
        raw[12..].copy_from_slice(&buff_dmg.to_le_bytes());
        Self::from_bytes(raw)
    }
}

/// API form: `XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX`.
impl std::fmt::Display for GuildId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:08X}-{:04X}-{:04X}-{:04X}-{:04X}{:08X}",
            self.p1, self.p2, self.p3, self.p4, self.p5, self.p6
        )
    }
}

impl Serialize for GuildId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bytes() -> [u8; 16] {
        [
            0x78, 0x56, 0x34, 0x12, // p1 LE
            0xCD, 0xAB, // p2 LE
            0x01, 0xEF, // p3 LE
            0x12, 0x34, // p4 BE
            0x56, 0x78, // p5 BE
            0x9A, 0xBC, 0xDE, 0xF0, // p6 BE
        ]
    }

    #[test]
    fn test_big_endian_groups_are_swapped() {
        let guid = GuildId::from_bytes(sample_bytes());

        assert_eq!(guid.p4, 0x1234);
        assert_eq!(guid.p5, 0x5678);
        assert_eq!(guid.p6, 0x9ABCDEF0);
        assert_eq!(
            format!("{:04X}-{:04X}-{:08X}", guid.p4, guid.p5, guid.p6),
            "1234-5678-9ABCDEF0"
        );
    }

    #[test]
    fn test_little_endian_groups_are_kept() {
        let guid = GuildId::from_bytes(sample_bytes());

        assert_eq!(guid.p1, 0x12345678);
        assert_eq!(guid.p2, 0xABCD);
        assert_eq!(guid.p3, 0xEF01);
    }

    #[test]
    fn test_display_api_form() {
        let guid = GuildId::from_bytes(sample_bytes());
        assert_eq!(guid.to_string(), "12345678-ABCD-EF01-1234-56789ABCDEF0");
    }

    #[test]
    fn test_from_event_fields_matches_raw_overlay() {
        let raw = sample_bytes();
        let dst_agent = u64::from_le_bytes(raw[..8].try_into().unwrap());
        let value = i32::from_le_bytes(raw[8..12].try_into().unwrap());
        let buff_dmg = i32::from_le_bytes(raw[12..].try_into().unwrap());

        assert_eq!(
            GuildId::from_event_fields(dst_agent, value, buff_dmg),
            GuildId::from_bytes(raw)
        );
    }
}
