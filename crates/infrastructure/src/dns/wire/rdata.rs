use dohgate_domain::{DnsRecord, DomainError, RecordData};
use hickory_proto::rr::rdata::{A, AAAA, CNAME, MX, NS, PTR, SOA, SRV, TXT};
use hickory_proto::rr::{Name, RData, Record};

/// Builds the wire record for a translated DoH record.
pub fn to_hickory_record(record: &DnsRecord) -> Result<Record, DomainError> {
    let owner = parse_name(&record.name)?;
    let rdata = to_rdata(&record.data)?;
    Ok(Record::from_rdata(owner, record.ttl, rdata))
}

fn to_rdata(data: &RecordData) -> Result<RData, DomainError> {
    let rdata = match data {
        RecordData::A(ip) => RData::A(A(*ip)),
        RecordData::AAAA(ip) => RData::AAAA(AAAA(*ip)),
        RecordData::CNAME(target) => RData::CNAME(CNAME(parse_name(target)?)),
        RecordData::NS(target) => RData::NS(NS(parse_name(target)?)),
        RecordData::PTR(target) => RData::PTR(PTR(parse_name(target)?)),
        RecordData::MX {
            preference,
            exchange,
        } => RData::MX(MX::new(*preference, parse_name(exchange)?)),
        RecordData::TXT(strings) => {
            RData::TXT(TXT::from_bytes(strings.iter().map(Vec::as_slice).collect()))
        }
        RecordData::SOA(soa) => RData::SOA(SOA::new(
            parse_name(&soa.mname)?,
            parse_name(&soa.rname)?,
            soa.serial,
            // hickory keeps these as i32; the 32 bits on the wire are unchanged.
            soa.refresh as i32,
            soa.retry as i32,
            soa.expire as i32,
            soa.minimum,
        )),
        RecordData::SRV {
            priority,
            weight,
            port,
            target,
        } => RData::SRV(SRV::new(*priority, *weight, *port, parse_name(target)?)),
    };
    Ok(rdata)
}

pub(super) fn parse_name(name: &str) -> Result<Name, DomainError> {
    Name::from_ascii(name)
        .map_err(|e| DomainError::InvalidDomainName(format!("'{}': {}", name, e)))
}
