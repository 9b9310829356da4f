use domain_name_query_types::NameQuery;

use crate::error::Result;
use crate::header::Header;
use crate::question::Question;

pub struct RequestMessage {
    header: Header,
    question: Question,
}

impl RequestMessage {
    pub fn new(id: u16, name_query: &NameQuery) -> Self {
        let header = Header::query(id);
        let question = Question::new(name_query);

        Self { header, question }
    }

    pub fn to_bytes(&self, bytes: &mut Vec<u8>) -> Result<()> {
        bytes.extend_from_slice(&self.header.to_bytes());
        self.question.to_bytes(bytes)?;

        Ok(())
    }
}
