use std::fmt::{self, Display, Write as _};

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Uppercase hex view of a record, two digits per byte, no separators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexRecord<'a>(pub &'a [u8]);

impl Display for HexRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &byte in self.0 {
            f.write_char(char::from(HEX_DIGITS[usize::from(byte >> 4)]))?;
            f.write_char(char::from(HEX_DIGITS[usize::from(byte & 0x0F)]))?;
        }
        Ok(())
    }
}

pub fn encode_upper(bytes: &[u8]) -> String {
    HexRecord(bytes).to_string()
}
