use byteorder::{ByteOrder, BE};
use std::fmt;

use crate::error::{DnsError, Result};
use crate::reader::Reader;

pub const HEADER_LEN: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Qr {
    Query,
    Response,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Query,
    IQuery,
    Status,
}

impl Opcode {
    fn code(&self) -> u8 {
        match self {
            Opcode::Query => 0,
            Opcode::IQuery => 1,
            Opcode::Status => 2,
        }
    }
}

impl TryFrom<u8> for Opcode {
    type Error = DnsError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Opcode::Query),
            1 => Ok(Opcode::IQuery),
            2 => Ok(Opcode::Status),
            other => Err(DnsError::UnknownOpcode(other)),
        }
    }
}

/// Response code carried in the low four bits of the second flags byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rcode {
    Ok,
    FormatError,
    ServerFailure,
    NameError,
    NotImplemented,
    Refused,
}

impl Rcode {
    pub fn code(&self) -> u8 {
        match self {
            Rcode::Ok => 0,
            Rcode::FormatError => 1,
            Rcode::ServerFailure => 2,
            Rcode::NameError => 3,
            Rcode::NotImplemented => 4,
            Rcode::Refused => 5,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Rcode::Ok => "no error",
            Rcode::FormatError => "the server was unable to interpret the query",
            Rcode::ServerFailure => "the server was unable to process the query due to a problem with the server",
            Rcode::NameError => "the domain name referenced in the query does not exist",
            Rcode::NotImplemented => "the server does not support the requested kind of query",
            Rcode::Refused => "the server refuses to perform the specified operation for policy reasons",
        }
    }
}

impl TryFrom<u8> for Rcode {
    type Error = DnsError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Rcode::Ok),
            1 => Ok(Rcode::FormatError),
            2 => Ok(Rcode::ServerFailure),
            3 => Ok(Rcode::NameError),
            4 => Ok(Rcode::NotImplemented),
            5 => Ok(Rcode::Refused),
            other => Err(DnsError::UnknownResponseCode(other)),
        }
    }
}

impl fmt::Display for Rcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Rcode::Ok => "OK",
            Rcode::FormatError => "FORMAT_ERROR",
            Rcode::ServerFailure => "SERVER_FAILURE",
            Rcode::NameError => "NAME_ERROR",
            Rcode::NotImplemented => "NOT_IMPLEMENTED",
            Rcode::Refused => "REFUSED",
        };
        write!(f, "{}", s)
    }
}

// 12 bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub id: u16,
    pub qr: Qr,
    pub opcode: Opcode,
    pub aa: bool,
    pub tc: bool,
    pub rd: bool,
    pub ra: bool,
    pub rcode: Rcode,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

impl Header {
    /// Header of a plain query with one question and every flag cleared.
    pub fn query(id: u16) -> Self {
        Self {
            id,
            qr: Qr::Query,
            opcode: Opcode::Query,
            aa: false,
            tc: false,
            rd: false,
            ra: false,
            rcode: Rcode::Ok,
            qdcount: 1,
            ancount: 0,
            nscount: 0,
            arcount: 0,
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];

        let flags1 = (u8::from(self.qr == Qr::Response) << 7)
            | (self.opcode.code() << 3)
            | (u8::from(self.aa) << 2)
            | (u8::from(self.tc) << 1)
            | u8::from(self.rd);
        let flags2 = (u8::from(self.ra) << 7) | self.rcode.code();

        BE::write_u16(&mut bytes[0..2], self.id);
        bytes[2] = flags1;
        bytes[3] = flags2;
        BE::write_u16(&mut bytes[4..6], self.qdcount);
        BE::write_u16(&mut bytes[6..8], self.ancount);
        BE::write_u16(&mut bytes[8..10], self.nscount);
        BE::write_u16(&mut bytes[10..12], self.arcount);

        bytes
    }

    pub fn parse_from_reader(rdr: &mut Reader) -> Result<Self> {
        let id = rdr.read_u16()?;
        let flags1 = rdr.read_u8()?;
        let flags2 = rdr.read_u8()?;
        let qdcount = rdr.read_u16()?;
        let ancount = rdr.read_u16()?;
        let nscount = rdr.read_u16()?;
        let arcount = rdr.read_u16()?;

        let qr = if flags1 >> 7 == 1 { Qr::Response } else { Qr::Query };
        let opcode = Opcode::try_from((flags1 & 0b0111_1000) >> 3)?;
        // Z bits (flags2 & 0b0111_0000) are ignored
        let rcode = Rcode::try_from(flags2 & 0b0000_1111)?;

        let h = Self {
            id,
            qr,
            opcode,
            aa: flags1 & 0b0000_0100 != 0,
            tc: flags1 & 0b0000_0010 != 0,
            rd: flags1 & 0b0000_0001 != 0,
            ra: flags2 & 0b1000_0000 != 0,
            rcode,
            qdcount,
            ancount,
            nscount,
            arcount,
        };

        Ok(h)
    }

    /// Checks that this header answers the outstanding query `expected_id`.
    ///
    /// A non-OK RCODE is reported as [`DnsError::ServerReportedError`]
    /// before the counts are looked at.
    pub fn check_response(&self, expected_id: u16) -> Result<()> {
        if self.id != expected_id {
            return Err(DnsError::UnexpectedId(self.id));
        }
        if self.qr == Qr::Query {
            return Err(DnsError::NotAResponse);
        }
        if self.rcode != Rcode::Ok {
            return Err(DnsError::ServerReportedError(self.rcode));
        }
        if self.qdcount != 1 {
            return Err(DnsError::UnexpectedQuestionCount(self.qdcount));
        }
        if self.ancount < self.qdcount {
            return Err(DnsError::InsufficientAnswers(self.ancount));
        }

        Ok(())
    }

    pub fn qd_count(&self) -> u16 {
        self.qdcount
    }

    pub fn answer_count(&self) -> u16 {
        self.ancount
    }
}
