//! UDP payload ↔ `Query` / reply bytes, on top of `hickory-proto`.

use super::rdata::{parse_name, to_hickory_record};
use dohgate_domain::{DomainError, Query, UpstreamResponse};
use hickory_proto::op::{Message, MessageType, OpCode, Query as WireQuery, ResponseCode};
use hickory_proto::rr::{DNSClass, RecordType as WireRecordType};
use std::net::SocketAddr;

/// Largest RCODE the 4-bit header field can carry without an OPT record.
const MAX_HEADER_RCODE: u16 = 0x0F;

pub struct WireCodec;

impl WireCodec {
    /// Decodes one datagram. Only standard queries with at least one
    /// question are accepted; extra questions are ignored.
    pub fn parse(bytes: &[u8], client: SocketAddr) -> Result<Query, DomainError> {
        let message = Message::from_vec(bytes)
            .map_err(|e| DomainError::MalformedQuery(format!("Failed to decode: {}", e)))?;

        if message.message_type() != MessageType::Query {
            return Err(DomainError::MalformedQuery(
                "Message is a response".to_string(),
            ));
        }

        if message.op_code() != OpCode::Query {
            return Err(DomainError::MalformedQuery(format!(
                "Unsupported opcode {:?}",
                message.op_code()
            )));
        }

        let question = message
            .queries()
            .first()
            .ok_or_else(|| DomainError::MalformedQuery("No question section".to_string()))?;

        Ok(Query::new(
            message.id(),
            question.name().to_ascii(),
            u16::from(question.query_type()),
            client,
        )
        .with_class(u16::from(question.query_class()))
        .with_recursion_desired(message.recursion_desired()))
    }

    /// Encodes the reply to `query`: header and question echoed, RCODE taken
    /// from the upstream status. Extended statuses have no header encoding
    /// and are rejected.
    pub fn serialize(query: &Query, response: &UpstreamResponse) -> Result<Vec<u8>, DomainError> {
        if response.status > MAX_HEADER_RCODE {
            return Err(DomainError::UpstreamProtocolError(format!(
                "Status {} does not fit the header RCODE",
                response.status
            )));
        }

        let mut message = Message::new();
        message
            .set_id(query.id)
            .set_message_type(MessageType::Response)
            .set_op_code(OpCode::Query)
            .set_recursion_desired(query.recursion_desired)
            .set_recursion_available(true);

        let rcode: ResponseCode = response.status.into();
        message.set_response_code(rcode);
        message.add_query(Self::question(query)?);

        for record in &response.answers {
            message.add_answer(to_hickory_record(record)?);
        }
        for record in &response.authorities {
            message.add_name_server(to_hickory_record(record)?);
        }

        message
            .to_vec()
            .map_err(|e| DomainError::EncodeError(e.to_string()))
    }

    /// Standard recursive query with a single question of class IN.
    pub fn build_query(name: &str, qtype: u16, id: u16) -> Result<Vec<u8>, DomainError> {
        let question = WireQuery::query(parse_name(name)?, WireRecordType::from(qtype));

        let mut message = Message::new();
        message
            .set_id(id)
            .set_message_type(MessageType::Query)
            .set_op_code(OpCode::Query)
            .set_recursion_desired(true)
            .add_query(question);

        message
            .to_vec()
            .map_err(|e| DomainError::EncodeError(e.to_string()))
    }

    fn question(query: &Query) -> Result<WireQuery, DomainError> {
        let mut question = WireQuery::query(
            parse_name(&query.name)?,
            WireRecordType::from(query.qtype),
        );
        question.set_query_class(DNSClass::from(query.qclass));
        Ok(question)
    }
}
