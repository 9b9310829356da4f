use domain_name_query_types::NameQuery;

use crate::error::{DnsError, Result};
use crate::header::{Header, HEADER_LEN};
use crate::reader::Reader;
use crate::request_message::RequestMessage;
use crate::response_message::ResponseMessage;

/// Only one query is outstanding at a time, so the ID never changes.
pub const QUERY_ID: u16 = 1;

/// One outstanding query: its ID and the exact bytes that were sent.
///
/// The sent question is kept so the echo in a response can be compared
/// byte for byte.
#[derive(Debug, Clone)]
pub struct Query {
    id: u16,
    name_query: NameQuery,
    request_bytes: Vec<u8>,
}

impl Query {
    pub fn new(name_query: NameQuery) -> Result<Self> {
        Self::with_id(QUERY_ID, name_query)
    }

    pub fn with_id(id: u16, name_query: NameQuery) -> Result<Self> {
        let mut request_bytes = Vec::new();
        RequestMessage::new(id, &name_query).to_bytes(&mut request_bytes)?;

        Ok(Self {
            id,
            name_query,
            request_bytes,
        })
    }

    pub fn id(&self) -> u16 {
        self.id
    }

    pub fn name_query(&self) -> &NameQuery {
        &self.name_query
    }

    pub fn request_bytes(&self) -> &[u8] {
        &self.request_bytes
    }

    pub fn question_bytes(&self) -> &[u8] {
        &self.request_bytes[HEADER_LEN..]
    }

    /// Validates a received datagram against this query.
    ///
    /// Errors for which [`DnsError::is_terminal`] is false mean the datagram
    /// is not an answer to this query and should be skipped.
    pub fn check_response<'a>(&self, response: &'a [u8]) -> Result<ResponseMessage<'a>> {
        let mut rdr = Reader::new(response);

        let header = Header::parse_from_reader(&mut rdr)?;
        header.check_response(self.id)?;

        let question = self.question_bytes();
        let echoed = rdr.read_slice(question.len())?;
        if echoed != question {
            return Err(DnsError::QuestionMismatch);
        }

        Ok(ResponseMessage::new(header, response, rdr.position()))
    }
}
