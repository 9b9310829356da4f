use domain_name_query_types::QType;
use std::fmt;

use crate::error::{DnsError, Result};
use crate::name::decode_name;
use crate::reader::Reader;

/// Type-specific payload of an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RData {
    A(Vec<u8>),
    Aaaa(Vec<u8>),
    Mx { preference: u16, exchanger: String },
    Txt(Vec<String>),
}

impl RData {
    /// Decodes `rdlength` bytes at `offset`. MX exchanger labels must sit
    /// inside the RDATA, though a pointer may jump anywhere in `message`.
    fn decode(rtype: QType, message: &[u8], offset: usize, rdlength: usize) -> Result<Self> {
        let mut rdr = Reader::at(message, offset);
        let rdata = rdr.read_slice(rdlength)?;

        let data = match rtype {
            QType::A => RData::A(rdata.to_vec()),
            QType::Aaaa => RData::Aaaa(rdata.to_vec()),
            QType::Mx => {
                let mut rdr = Reader::new(rdata);
                let preference = rdr.read_u16()?;
                let (exchanger, next) = decode_name(message, offset + 2)?;
                if next > offset + rdlength {
                    return Err(DnsError::TruncatedMessage);
                }
                RData::Mx { preference, exchanger }
            }
            QType::Txt => {
                let mut rdr = Reader::new(rdata);
                let mut strings = Vec::new();
                while rdr.remaining() > 0 {
                    let len = rdr.read_u8()?;
                    let s = rdr.read_slice(usize::from(len))?;
                    strings.push(String::from_utf8_lossy(s).to_string());
                }
                RData::Txt(strings)
            }
        };

        Ok(data)
    }
}

// AAAA is rendered like A: one decimal number per octet
fn write_octets(f: &mut fmt::Formatter, octets: &[u8]) -> fmt::Result {
    let parts: Vec<String> = octets.iter().map(|b| b.to_string()).collect();
    write!(f, "{}", parts.join("."))
}

impl fmt::Display for RData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RData::A(octets) | RData::Aaaa(octets) => write_octets(f, octets),
            RData::Mx { preference, exchanger } => {
                write!(f, "MX preference = {}, exchanger = {}", preference, exchanger)
            }
            RData::Txt(strings) => write!(f, "{}", strings.join("\n")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub domain: String,
    pub rtype: QType,
    pub rclass: u16,
    pub ttl: u32,
    pub rdlength: u16,
    pub rdata: RData,
}

impl ResourceRecord {
    pub fn parse_from_reader(rdr: &mut Reader) -> Result<Self> {
        let domain = rdr.read_name()?;

        let code = rdr.read_u16()?;
        let rtype = QType::try_from(code).map_err(DnsError::UnknownRecordType)?;
        let rclass = rdr.read_u16()?;
        let ttl = rdr.read_u32()?;
        let rdlength = rdr.read_u16()?;

        let rdata_offset = rdr.position();
        let rdata = RData::decode(rtype, rdr.message(), rdata_offset, usize::from(rdlength))?;
        // RDLENGTH decides where the next record starts
        rdr.set_position(rdata_offset + usize::from(rdlength));

        let record = Self {
            domain,
            rtype,
            rclass,
            ttl,
            rdlength,
            rdata,
        };

        Ok(record)
    }
}

/// Answer records decoded one at a time, in message order.
///
/// Stops after `count` records or after the first error.
pub struct Answers<'a> {
    reader: Reader<'a>,
    remaining: u16,
}

impl<'a> Answers<'a> {
    pub fn new(message: &'a [u8], offset: usize, count: u16) -> Self {
        Self {
            reader: Reader::at(message, offset),
            remaining: count,
        }
    }
}

impl<'a> Iterator for Answers<'a> {
    type Item = Result<ResourceRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        match ResourceRecord::parse_from_reader(&mut self.reader) {
            Ok(record) => {
                self.remaining -= 1;
                Some(Ok(record))
            }
            Err(e) => {
                self.remaining = 0;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(usize::from(self.remaining)))
    }
}

impl<'a> std::iter::FusedIterator for Answers<'a> {}

#[cfg(test)]
mod tests {
    use super::*;

    // name, type, class IN, ttl 300, rdlength, rdata
    fn record(name: &[u8], rtype: u16, rdata: &[u8]) -> Vec<u8> {
        let mut bytes = name.to_vec();
        bytes.extend_from_slice(&rtype.to_be_bytes());
        bytes.extend_from_slice(&[0, 1, 0, 0, 1, 44]);
        bytes.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
        bytes.extend_from_slice(rdata);
        bytes
    }

    fn parse_one(message: &[u8], offset: usize) -> Result<ResourceRecord> {
        ResourceRecord::parse_from_reader(&mut Reader::at(message, offset))
    }

    #[test]
    fn a_record() {
        let message = record(b"\x03dns\x06google\x00", 1, &[8, 8, 8, 8]);
        let r = parse_one(&message, 0).unwrap();

        assert_eq!("dns.google", r.domain);
        assert_eq!(QType::A, r.rtype);
        assert_eq!(1, r.rclass);
        assert_eq!(300, r.ttl);
        assert_eq!(4, r.rdlength);
        assert_eq!("8.8.8.8", r.rdata.to_string());
    }

    #[test]
    fn aaaa_record_is_dotted_decimal() {
        let octets = [0x20, 0x01, 0x48, 0x60, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x88, 0x88];
        let message = record(b"\x00", 28, &octets);
        let r = parse_one(&message, 0).unwrap();

        assert_eq!(QType::Aaaa, r.rtype);
        assert_eq!("32.1.72.96.0.0.0.0.0.0.0.0.0.0.136.136", r.rdata.to_string());
    }

    #[test]
    fn txt_record() {
        let message = record(b"\x00", 16, b"\x05hello\x05world");
        let r = parse_one(&message, 0).unwrap();

        assert_eq!(12, r.rdlength);
        assert_eq!(RData::Txt(vec!["hello".into(), "world".into()]), r.rdata);
        assert_eq!("hello\nworld", r.rdata.to_string());
    }

    #[test]
    fn txt_string_past_rdata() {
        let message = record(b"\x00", 16, b"\x09hello");
        assert_eq!(Err(DnsError::TruncatedMessage), parse_one(&message, 0));
    }

    #[test]
    fn mx_record_with_pointer() {
        // "example.com" at offset 0, record follows
        let mut message = b"\x07example\x03com\x00".to_vec();
        let record_at = message.len();
        message.extend(record(&[0xc0, 0], 15, b"\x00\x0a\x04mail\xc0\x00"));

        let r = parse_one(&message, record_at).unwrap();
        assert_eq!("example.com", r.domain);
        assert_eq!(
            RData::Mx {
                preference: 10,
                exchanger: "mail.example.com".into()
            },
            r.rdata
        );
        assert_eq!("MX preference = 10, exchanger = mail.example.com", r.rdata.to_string());
    }

    #[test]
    fn mx_without_preference() {
        let message = record(b"\x00", 15, b"\x00");
        assert_eq!(Err(DnsError::TruncatedMessage), parse_one(&message, 0));
    }

    #[test]
    fn mx_exchanger_stays_inside_rdata() {
        // preference only, the next record's name must not become the exchanger
        let mut message = record(b"\x00", 15, b"\x00\x0a");
        message.extend(record(b"\x04evil\x00", 1, &[1, 2, 3, 4]));

        let mut answers = Answers::new(&message, 0, 2);
        assert_eq!(Some(Err(DnsError::TruncatedMessage)), answers.next());
        assert_eq!(None, answers.next());

        // exchanger label runs one byte past RDLENGTH
        let mut message = record(b"\x00", 15, b"\x00\x0a\x04mail");
        message.push(0);
        assert_eq!(Err(DnsError::TruncatedMessage), parse_one(&message, 0));
    }

    #[test]
    fn unknown_type() {
        let message = record(b"\x00", 5, b"\x00");
        assert_eq!(Err(DnsError::UnknownRecordType(5)), parse_one(&message, 0));
    }

    #[test]
    fn rdlength_past_end() {
        let mut message = record(b"\x00", 1, &[1, 2, 3, 4]);
        message.truncate(message.len() - 1);
        assert_eq!(Err(DnsError::TruncatedMessage), parse_one(&message, 0));
    }

    #[test]
    fn rdlength_decides_next_record() {
        // the MX name ends before RDLENGTH does; the trailing bytes are skipped
        let mut message = record(b"\x00", 15, b"\x00\x05\x01a\x00\xff\xff");
        message.extend(record(b"\x00", 1, &[1, 2, 3, 4]));

        let answers: Vec<_> = Answers::new(&message, 0, 2).collect::<Result<_>>().unwrap();
        assert_eq!(2, answers.len());
        assert_eq!("MX preference = 5, exchanger = a", answers[0].rdata.to_string());
        assert_eq!("1.2.3.4", answers[1].rdata.to_string());
    }

    #[test]
    fn answers_stop_after_error() {
        let mut message = record(b"\x00", 99, &[]);
        message.extend(record(b"\x00", 1, &[1, 2, 3, 4]));

        let mut answers = Answers::new(&message, 0, 2);
        assert_eq!(Some(Err(DnsError::UnknownRecordType(99))), answers.next());
        assert_eq!(None, answers.next());
    }
}
