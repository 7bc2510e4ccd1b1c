mod codec;
mod rdata;

pub use codec::WireCodec;
pub use rdata::to_hickory_record;
