use std::io::{Read, Seek};

use crate::error::Result;
use crate::evtc::layout::{Layout, NAME_SIZE, skill};
use crate::source::{ByteBuffer, LogSource, decode_utf8};

/// One skill record. Parsing only needs the array width to reach the events;
/// the record itself is decoded for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillRecord {
    pub id: i32,
    pub name: String,
}

impl SkillRecord {
    pub fn decode(raw: &[u8]) -> Result<Self> {
        let mut buf = ByteBuffer::new(raw);
        let id = buf.read_i32()?;
        let name = decode_utf8(buf.read_bytes(NAME_SIZE)?);
        Ok(Self { id, name })
    }

    /// Read skill record `index`, or `None` past the end of the skill array.
    pub fn read<R: Read + Seek>(
        source: &mut LogSource<R>,
        layout: &Layout,
        index: u32,
    ) -> Result<Option<Self>> {
        if index >= layout.skill_count {
            return Ok(None);
        }
        let mut raw = [0u8; skill::RECORD_SIZE as usize];
        source.read_exact_at(layout.skill_offset(index), &mut raw)?;
        Self::decode(&raw).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_skill() {
        let mut raw = 1175i32.to_le_bytes().to_vec();
        raw.extend_from_slice(b"Bandage\0");
        raw.resize(skill::RECORD_SIZE as usize, 0);

        let skill = SkillRecord::decode(&raw).unwrap();
        assert_eq!(skill.id, 1175);
        assert_eq!(skill.name, "Bandage");
    }
}
