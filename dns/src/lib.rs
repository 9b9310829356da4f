//! Encoding of single-question DNS queries and decoding of their responses.
//!
//! Wire format per <https://datatracker.ietf.org/doc/html/rfc1035#section-4>.

mod error;
mod header;
mod name;
mod query;
mod question;
mod reader;
mod request_message;
mod resource_record;
mod response_message;

pub use domain_name_query_types::{NameQuery, QType};
pub use error::{DnsError, Result};
pub use header::{Header, Opcode, Qr, Rcode, HEADER_LEN};
pub use name::{decode_name, encode_name};
pub use query::{Query, QUERY_ID};
pub use resource_record::{Answers, RData, ResourceRecord};
pub use response_message::ResponseMessage;

pub fn encode_request(name_query: NameQuery) -> Result<Query> {
    Query::new(name_query)
}
