use byteorder::{ByteOrder, BE};
use domain_name_query_types::{NameQuery, QType};

use crate::error::Result;
use crate::name::encode_name;

/// QCLASS IN
pub const CLASS_INET: u16 = 1;

#[derive(Debug)]
pub struct Question {
    domain: String,
    qtype: QType,
    qclass: u16,
}

impl Question {
    pub fn new(name_query: &NameQuery) -> Self {
        Self {
            domain: name_query.name.clone(),
            qtype: name_query.q_type,
            qclass: CLASS_INET,
        }
    }

    pub fn to_bytes(&self, bytes: &mut Vec<u8>) -> Result<()> {
        let qname = encode_name(&self.domain)?;
        bytes.extend_from_slice(&qname);

        let mut tail = [0u8; 4];
        BE::write_u16(&mut tail[0..2], self.qtype.code());
        BE::write_u16(&mut tail[2..4], self.qclass);
        bytes.extend_from_slice(&tail);

        Ok(())
    }
}
