use crate::error::{DnsError, Result};

// https://datatracker.ietf.org/doc/html/rfc1035#section-2.3.4
const MAX_LABEL_LEN: usize = 63;
const MAX_NAME_LEN: usize = 255;

// A name is at most 255 bytes, so no well-formed name needs more jumps than this.
const MAX_POINTER_HOPS: usize = MAX_NAME_LEN / 2;

const POINTER_MASK: u8 = 0b1100_0000;

/// Encodes a dotted domain name as length-prefixed labels followed by the
/// zero-length root label.
///
/// ```
/// let qname = dns::encode_name("google.com").unwrap();
/// assert_eq!(b"\x06google\x03com\x00", qname.as_slice());
/// ```
pub fn encode_name(domain: &str) -> Result<Vec<u8>> {
    let invalid = |reason| DnsError::InvalidName {
        name: domain.to_string(),
        reason,
    };

    if domain.is_empty() {
        return Err(invalid("empty name"));
    }
    if !domain.is_ascii() {
        return Err(invalid("non-ASCII characters"));
    }

    let mut qname: Vec<u8> = Vec::with_capacity(domain.len() + 2);
    for label in domain.split('.') {
        if label.is_empty() {
            return Err(invalid("empty label"));
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(invalid("label longer than 63 bytes"));
        }

        qname.push(label.len() as u8);
        qname.extend_from_slice(label.as_bytes());
    }
    qname.push(0);

    if qname.len() > MAX_NAME_LEN {
        return Err(invalid("name longer than 255 bytes"));
    }

    Ok(qname)
}

/// Decodes the name starting at `start`, following compression pointers into
/// the rest of `message`.
///
/// Returns the dotted name and the offset just past the name as stored at
/// `start`: after the terminating zero byte, or after the two pointer bytes
/// when the name ends in a pointer.
pub fn decode_name(message: &[u8], start: usize) -> Result<(String, usize)> {
    let mut labels = Vec::new();
    let next = read_labels(message, start, &mut labels, 0)?;
    Ok((labels.join("."), next))
}

fn read_labels(message: &[u8], start: usize, labels: &mut Vec<String>, hops: usize) -> Result<usize> {
    let mut index = start;

    loop {
        let len_byte = *message.get(index).ok_or(DnsError::TruncatedMessage)?;
        index += 1;

        match len_byte & POINTER_MASK {
            0b1100_0000 => {
                if hops >= MAX_POINTER_HOPS {
                    return Err(DnsError::CompressionLoop(start));
                }

                let low = *message.get(index).ok_or(DnsError::TruncatedMessage)?;
                index += 1;

                let target = (usize::from(len_byte & !POINTER_MASK) << 8) | usize::from(low);
                read_labels(message, target, labels, hops + 1)?;

                // 指针总是名字的结尾
                return Ok(index);
            }
            0b0000_0000 => {
                let label_len = usize::from(len_byte);
                if label_len == 0 {
                    return Ok(index);
                }

                let label_bytes = message
                    .get(index..index + label_len)
                    .ok_or(DnsError::TruncatedMessage)?;
                labels.push(String::from_utf8_lossy(label_bytes).to_string());

                index += label_len;
            }
            _ => return Err(DnsError::BadLabel(len_byte)),
        }
    }
}
