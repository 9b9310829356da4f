use crate::header::Header;
use crate::resource_record::{Answers, ResourceRecord};
use crate::error::Result;

/// A response that passed header and question validation.
///
/// Borrows the received datagram; answers are decoded on demand.
#[derive(Debug)]
pub struct ResponseMessage<'a> {
    header: Header,
    message: &'a [u8],
    answers_offset: usize,
}

impl<'a> ResponseMessage<'a> {
    pub(crate) fn new(header: Header, message: &'a [u8], answers_offset: usize) -> Self {
        Self {
            header,
            message,
            answers_offset,
        }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn answers(&self) -> Answers<'a> {
        Answers::new(self.message, self.answers_offset, self.header.answer_count())
    }

    pub fn answer_records(&self) -> Result<Vec<ResourceRecord>> {
        self.answers().collect()
    }
}
