use serde::Serialize;
use std::io::{Read, Seek};

use crate::error::{Error, Result};
use crate::evtc::layout::{HEADER_SIZE, Revision};
use crate::source::{ByteBuffer, LogSource};

const MAGIC: &[u8; 4] = b"EVTC";

/// The fixed 16-byte header at the start of every log.
///
/// ```text
/// Offset   Field           Size
/// ──────────────────────────────
/// 0x00     magic "EVTC"    4
/// 0x04     build date      8     ASCII digits, YYYYMMDD
/// 0x0C     revision        1
/// 0x0D     encounter id    2     little-endian
/// 0x0F     NUL             1
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncounterHeader {
    pub build: String,
    pub revision: Revision,
    pub encounter_id: u16,
}

impl EncounterHeader {
    /// Read and validate the header at the start of `source`.
    pub fn read<R: Read + Seek>(source: &mut LogSource<R>) -> Result<Self> {
        if source.len() < HEADER_SIZE {
            return Err(Error::MalformedHeader(format!(
                "file is {} bytes, shorter than the {}-byte header",
                source.len(),
                HEADER_SIZE
            )));
        }

        let mut raw = [0u8; HEADER_SIZE as usize];
        source.read_exact_at(0, &mut raw)?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &[u8; HEADER_SIZE as usize]) -> Result<Self> {
        let mut buf = ByteBuffer::new(raw);

        let magic: [u8; 4] = buf.read_array()?;
        if &magic != MAGIC {
            return Err(Error::MalformedHeader(format!(
                "bad magic {:?}, expected \"EVTC\"",
                String::from_utf8_lossy(&magic)
            )));
        }

        let build: [u8; 8] = buf.read_array()?;
        if !build.iter().all(u8::is_ascii_digit) {
            return Err(Error::MalformedHeader(format!(
                "build id {:?} is not numeric",
                String::from_utf8_lossy(&build)
            )));
        }

        let revision = Revision::from_u8(buf.read_u8()?)?;
        let encounter_id = buf.read_u16()?;

        if buf.read_u8()? != 0 {
            return Err(Error::MalformedHeader(
                "header is not NUL-terminated".to_string(),
            ));
        }

        Ok(Self {
            // All ASCII digits, so this is valid UTF-8.
            build: build.iter().map(|&b| b as char).collect(),
            revision,
            encounter_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn raw_header(revision: u8, encounter: u16) -> [u8; 16] {
        let mut raw = [0u8; 16];
        raw[..12].copy_from_slice(b"EVTC20190330");
        raw[12] = revision;
        raw[13..15].copy_from_slice(&encounter.to_le_bytes());
        raw
    }

    #[test]
    fn test_parse_valid_header() {
        let header = EncounterHeader::parse(&raw_header(1, 0x4314)).unwrap();

        assert_eq!(header.build, "20190330");
        assert_eq!(header.revision, Revision::V1);
        assert_eq!(header.encounter_id, 0x4314);
    }

    #[test]
    fn test_bad_magic() {
        let mut raw = raw_header(0, 1);
        raw[0] = b'X';
        assert!(matches!(
            EncounterHeader::parse(&raw),
            Err(Error::MalformedHeader(_))
        ));
    }

    #[test]
    fn test_non_digit_build() {
        let mut raw = raw_header(0, 1);
        raw[9] = b'A';
        assert!(matches!(
            EncounterHeader::parse(&raw),
            Err(Error::MalformedHeader(_))
        ));
    }

    #[test]
    fn test_unknown_revision() {
        let result = EncounterHeader::parse(&raw_header(2, 1));
        assert!(matches!(
            result,
            Err(Error::UnsupportedRevision { revision: 2, .. })
        ));
    }

    #[test]
    fn test_missing_terminator() {
        let mut raw = raw_header(1, 1);
        raw[15] = 0x7F;
        assert!(matches!(
            EncounterHeader::parse(&raw),
            Err(Error::MalformedHeader(_))
        ));
    }

    #[test]
    fn test_short_file() {
        let mut source = LogSource::new(Cursor::new(b"EVTC2019".to_vec())).unwrap();
        assert!(matches!(
            EncounterHeader::read(&mut source),
            Err(Error::MalformedHeader(_))
        ));
    }
}
