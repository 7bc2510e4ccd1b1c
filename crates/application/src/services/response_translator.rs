//! DoH JSON body → `UpstreamResponse`.
//!
//! Google-style JSON API payload:
//! ```text
//! {"Status": 0,
//!  "Answer":    [{"name": "example.com.", "type": 1, "TTL": 300, "data": "93.184.216.34"}],
//!  "Authority": [{"name": "example.com.", "type": 6, "TTL": 3600, "data": "ns. host. 1 2 3 4 5"}]}
//! ```
//! `data` is the presentation form of the RDATA and is decoded through a
//! fixed table keyed by numeric type code.

use dohgate_domain::{DnsRecord, DomainError, RecordData, RecordType, SoaData, UpstreamResponse};
use serde::Deserialize;
use std::net::{Ipv4Addr, Ipv6Addr};
use tracing::debug;

/// Longest character-string allowed on the wire.
const MAX_TXT_SEGMENT: usize = 255;

pub type Decoder = fn(&str) -> Result<RecordData, DomainError>;

static DECODERS: &[(RecordType, Decoder)] = &[
    (RecordType::A, decode_a),
    (RecordType::NS, decode_ns),
    (RecordType::CNAME, decode_cname),
    (RecordType::SOA, decode_soa),
    (RecordType::PTR, decode_ptr),
    (RecordType::MX, decode_mx),
    (RecordType::TXT, decode_txt),
    (RecordType::AAAA, decode_aaaa),
    (RecordType::SRV, decode_srv),
];

#[derive(Debug, Deserialize)]
struct JsonResponse {
    #[serde(rename = "Status")]
    status: u16,

    #[serde(rename = "Answer", default)]
    answer: Option<Vec<JsonRecord>>,

    #[serde(rename = "Authority", default)]
    authority: Option<Vec<JsonRecord>>,
}

#[derive(Debug, Deserialize)]
struct JsonRecord {
    name: String,

    #[serde(rename = "type")]
    record_type: u16,

    #[serde(rename = "TTL", default)]
    ttl: u32,

    data: String,
}

pub struct ResponseTranslator;

impl ResponseTranslator {
    /// Parses the body and decodes every record.
    ///
    /// Answers take precedence: authority records are only carried when the
    /// payload has no `Answer` list. A single undecodable record fails the
    /// whole response.
    pub fn translate(body: &[u8]) -> Result<UpstreamResponse, DomainError> {
        let parsed: JsonResponse = serde_json::from_slice(body).map_err(|e| {
            DomainError::UpstreamProtocolError(format!("Invalid DoH JSON body: {}", e))
        })?;

        let mut response = UpstreamResponse::new(parsed.status);

        if let Some(answers) = parsed.answer {
            response.answers = Self::decode_all(answers)?;
        } else if let Some(authorities) = parsed.authority {
            response.authorities = Self::decode_all(authorities)?;
        }

        debug!(
            status = response.status,
            answers = response.answers.len(),
            authority = response.authorities.len(),
            "DoH response translated"
        );

        Ok(response)
    }

    pub fn decoder_for(code: u16) -> Option<Decoder> {
        DECODERS
            .iter()
            .find(|(rt, _)| rt.to_u16() == code)
            .map(|(_, decoder)| *decoder)
    }

    fn decode_all(records: Vec<JsonRecord>) -> Result<Vec<DnsRecord>, DomainError> {
        records.into_iter().map(Self::decode_record).collect()
    }

    fn decode_record(record: JsonRecord) -> Result<DnsRecord, DomainError> {
        let decoder = Self::decoder_for(record.record_type)
            .ok_or(DomainError::UnsupportedRecordType(record.record_type))?;
        let data = decoder(&record.data)?;
        Ok(DnsRecord::new(record.name, record.ttl, data))
    }
}

fn malformed(kind: RecordType, data: &str) -> DomainError {
    DomainError::UpstreamProtocolError(format!("Malformed {} data: {:?}", kind, data))
}

fn decode_a(data: &str) -> Result<RecordData, DomainError> {
    data.trim()
        .parse::<Ipv4Addr>()
        .map(RecordData::A)
        .map_err(|_| malformed(RecordType::A, data))
}

fn decode_aaaa(data: &str) -> Result<RecordData, DomainError> {
    data.trim()
        .parse::<Ipv6Addr>()
        .map(RecordData::AAAA)
        .map_err(|_| malformed(RecordType::AAAA, data))
}

fn decode_name(kind: RecordType, data: &str) -> Result<String, DomainError> {
    let name = data.trim();
    if name.is_empty() || name.contains(char::is_whitespace) {
        return Err(malformed(kind, data));
    }
    Ok(name.to_string())
}

fn decode_cname(data: &str) -> Result<RecordData, DomainError> {
    decode_name(RecordType::CNAME, data).map(RecordData::CNAME)
}

fn decode_ns(data: &str) -> Result<RecordData, DomainError> {
    decode_name(RecordType::NS, data).map(RecordData::NS)
}

fn decode_ptr(data: &str) -> Result<RecordData, DomainError> {
    decode_name(RecordType::PTR, data).map(RecordData::PTR)
}

/// Splits `data` into exactly `N` whitespace-separated fields.
fn fields<const N: usize>(kind: RecordType, data: &str) -> Result<[&str; N], DomainError> {
    let parts: Vec<&str> = data.split_whitespace().collect();
    parts.try_into().map_err(|_| malformed(kind, data))
}

fn number<T: std::str::FromStr>(
    kind: RecordType,
    field: &str,
    data: &str,
) -> Result<T, DomainError> {
    field.parse().map_err(|_| malformed(kind, data))
}

fn decode_mx(data: &str) -> Result<RecordData, DomainError> {
    let [preference, exchange] = fields::<2>(RecordType::MX, data)?;
    Ok(RecordData::MX {
        preference: number(RecordType::MX, preference, data)?,
        exchange: exchange.to_string(),
    })
}

fn decode_srv(data: &str) -> Result<RecordData, DomainError> {
    let [priority, weight, port, target] = fields::<4>(RecordType::SRV, data)?;
    Ok(RecordData::SRV {
        priority: number(RecordType::SRV, priority, data)?,
        weight: number(RecordType::SRV, weight, data)?,
        port: number(RecordType::SRV, port, data)?,
        target: target.to_string(),
    })
}

fn decode_soa(data: &str) -> Result<RecordData, DomainError> {
    let [mname, rname, serial, refresh, retry, expire, minimum] =
        fields::<7>(RecordType::SOA, data)?;
    Ok(RecordData::SOA(SoaData {
        mname: mname.to_string(),
        rname: rname.to_string(),
        serial: number(RecordType::SOA, serial, data)?,
        refresh: number(RecordType::SOA, refresh, data)?,
        retry: number(RecordType::SOA, retry, data)?,
        expire: number(RecordType::SOA, expire, data)?,
        minimum: number(RecordType::SOA, minimum, data)?,
    }))
}

/// TXT data comes either bare (`v=spf1 -all`) or as one or more quoted
/// character-strings (`"part one" "part two"`).
fn decode_txt(data: &str) -> Result<RecordData, DomainError> {
    let trimmed = data.trim();
    let strings = if trimmed.starts_with('"') {
        parse_quoted(trimmed).ok_or_else(|| malformed(RecordType::TXT, data))?
    } else {
        vec![trimmed.as_bytes().to_vec()]
    };

    Ok(RecordData::TXT(
        strings.iter().flat_map(|s| split_segment(s)).collect(),
    ))
}

/// Quoted strings in master-file form: `\X` is a literal X and `\DDD` is
/// the byte with decimal value DDD.
fn parse_quoted(input: &str) -> Option<Vec<Vec<u8>>> {
    let mut strings = Vec::new();
    let mut chars = input.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        match chars.next() {
            None => break,
            Some('"') => {}
            Some(_) => return None,
        }

        let mut current = Vec::new();
        loop {
            match chars.next()? {
                '"' => break,
                '\\' => match chars.next()? {
                    d if d.is_ascii_digit() => {
                        let mut value = d.to_digit(10)?;
                        for _ in 0..2 {
                            value = value * 10 + chars.next()?.to_digit(10)?;
                        }
                        current.push(u8::try_from(value).ok()?);
                    }
                    c => push_char(&mut current, c),
                },
                c => push_char(&mut current, c),
            }
        }
        strings.push(current);
    }

    Some(strings)
}

fn push_char(buf: &mut Vec<u8>, c: char) {
    let mut utf8 = [0u8; 4];
    buf.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
}

fn split_segment(segment: &[u8]) -> Vec<Vec<u8>> {
    if segment.is_empty() {
        return vec![Vec::new()];
    }
    segment
        .chunks(MAX_TXT_SEGMENT)
        .map(<[u8]>::to_vec)
        .collect()
}
